use anyhow::{Context, Result};
use clap::Args;

use dock_forge::Record;
use dock_forge::ops::{CleanOptions, SanitizeConfig, clean};

use crate::commands::run_with_spinner;

/// Sanitizes a structure for interaction analysis.
#[derive(Debug, Default, Args)]
pub struct CleanArgs {
    /// Renumber atom serials and per-chain residues, remapping CONECT
    /// records. Without this flag CONECT lines are dropped instead.
    #[arg(long)]
    pub renumber: bool,
    /// Maximum allowed coordinate magnitude in ångströms.
    #[arg(long = "max-coord", value_name = "ANGSTROM", default_value_t = dock_forge::ops::DEFAULT_MAX_COORD)]
    pub max_coord: f64,
}

/// Cleans the loaded records and reports what was dropped.
pub fn run(records: Vec<Record>, args: &CleanArgs) -> Result<Vec<Record>> {
    let options = CleanOptions {
        renumber: args.renumber,
        sanitize: SanitizeConfig {
            max_coord: args.max_coord,
        },
    };

    let outcome = run_with_spinner("Cleaning structure", || {
        clean(records, &options).context("Failed to clean structure")
    })?;

    let report = outcome.report;
    eprintln!(
        "Kept {} atom(s); dropped {} atom(s), {} bond line(s), {} bond reference(s), {} debris line(s)",
        report.atoms_kept,
        report.atoms_dropped,
        report.bonds_dropped,
        report.bond_refs_dropped,
        report.debris_dropped
    );

    Ok(outcome.records)
}
