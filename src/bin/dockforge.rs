use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::IoParameters;
use commands::{clean, info, merge, normalize, split};

#[derive(Parser, Debug)]
#[command(
    name = "dockforge",
    about = "A command-line tool for preparing docking structure files: pose splitting, ligand normalization, complex merging, and pre-analysis cleanup.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Input file path. When omitted, stdin is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,
    /// Output file path. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect the record stream without modifying the data.
    Info(info::InfoArgs),
    /// Split multi-model docking output into one file per pose.
    Split(split::SplitArgs),
    /// Force ligand atoms to HETATM on a collision-free chain.
    Normalize(normalize::NormalizeArgs),
    /// Merge a receptor and a ligand into a single-model complex.
    Merge(merge::MergeArgs),
    /// Sanitize a structure for analysis, optionally renumbering.
    Clean(clean::CleanArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let io_params = IoParameters {
        input: cli.input.clone(),
        output: cli.output.clone(),
    };

    match cli.command {
        Command::Info(args) => {
            let records = commands::load_input(&io_params)?;
            info::run(&records, &args)?;
        }
        Command::Split(args) => {
            let records = commands::load_input(&io_params)?;
            let stem = commands::input_stem(&io_params);
            split::run(records, &stem, &args)?;
        }
        Command::Normalize(args) => {
            commands::ensure_noninteractive_stdout("normalize", &io_params)?;
            let mut records = commands::load_input(&io_params)?;
            normalize::run(&mut records, &args)?;
            commands::save_output(&records, &io_params)?;
        }
        Command::Merge(args) => {
            commands::ensure_noninteractive_stdout("merge", &io_params)?;
            let receptor = commands::load_input(&io_params)?;
            let merged = merge::run(&receptor, &args)?;
            commands::save_output(&merged, &io_params)?;
        }
        Command::Clean(args) => {
            commands::ensure_noninteractive_stdout("clean", &io_params)?;
            let records = commands::load_input(&io_params)?;
            let cleaned = clean::run(records, &args)?;
            commands::save_output(&cleaned, &io_params)?;
        }
    }

    Ok(())
}
