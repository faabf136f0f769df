use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dock_forge::Record;
use dock_forge::ops::merge;

use crate::commands::{load_records_from, run_with_spinner};

/// Merges the input receptor with a ligand into a single-model complex.
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Ligand structure appended after the receptor.
    #[arg(long, value_name = "FILE")]
    pub ligand: PathBuf,
    /// Preferred ligand chain id, used when the receptor does not claim it.
    #[arg(long, default_value_t = 'L')]
    pub chain: char,
}

/// Builds the merged complex from the loaded receptor and the ligand file.
pub fn run(receptor: &[Record], args: &MergeArgs) -> Result<Vec<Record>> {
    let ligand = load_records_from(&args.ligand)?;

    run_with_spinner("Merging receptor and ligand", || {
        merge(receptor, &ligand, Some(args.chain)).context("Failed to merge structures")
    })
}
