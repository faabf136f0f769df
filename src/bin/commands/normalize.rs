use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use dock_forge::Record;
use dock_forge::ops::{collect_chain_ids, normalize_ligand};

use crate::commands::{load_records_from, run_with_spinner};

/// Forces ligand atoms to HETATM and assigns a collision-free chain id.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Receptor whose chain ids must not be reused. When omitted, the
    /// ligand's own chains form the exclusion set.
    #[arg(long, value_name = "FILE")]
    pub receptor: Option<PathBuf>,
    /// Preferred ligand chain id, used when it does not collide.
    #[arg(long, default_value_t = 'L')]
    pub chain: char,
}

/// Normalizes the loaded ligand in place.
pub fn run(records: &mut [Record], args: &NormalizeArgs) -> Result<()> {
    let taken = match &args.receptor {
        Some(path) => collect_chain_ids(&load_records_from(path)?),
        None => collect_chain_ids(records),
    };

    let chain = run_with_spinner("Normalizing ligand", || {
        normalize_ligand(records, &taken, Some(args.chain))
            .context("Failed to normalize ligand")
    })?;

    eprintln!("Ligand assigned to chain {chain}");
    Ok(())
}
