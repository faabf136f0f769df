use std::fs::File;
use std::io::{self as stdio, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use dock_forge::Record;
use dock_forge::io::{read_records, write_records};

pub mod clean;
pub mod info;
pub mod merge;
pub mod normalize;
pub mod split;

/// Aggregated IO parameters shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct IoParameters {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Loads a record stream from the configured input source.
pub fn load_input(params: &IoParameters) -> Result<Vec<Record>> {
    if let Some(path) = &params.input {
        load_records_from(path)
    } else {
        let stdin = stdio::stdin();
        if stdin.is_terminal() {
            bail!(
                "No --input provided and stdin is a TTY. Provide -i/--input or pipe a structure into dockforge."
            );
        }
        let reader = BufReader::new(stdin.lock());
        read_records(reader).context("Failed to parse input from stdin")
    }
}

/// Loads a record stream from an explicit path (receptor/ligand side inputs).
pub fn load_records_from(path: &Path) -> Result<Vec<Record>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open input file {}", path.display()))?;
    let reader = BufReader::new(file);
    read_records(reader).with_context(|| format!("Failed to parse input from {}", path.display()))
}

/// Saves a record stream to the configured output destination.
pub fn save_output(records: &[Record], params: &IoParameters) -> Result<()> {
    match &params.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_records(&mut writer, records)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            writer.flush().context("Failed to flush output writer")?;
        }
        None => {
            let stdout = stdio::stdout();
            let handle = stdout.lock();
            let mut writer = BufWriter::new(handle);
            write_records(&mut writer, records).context("Failed to write output to stdout")?;
            writer.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Best-effort stem for derived file names, falling back to a neutral label
/// when reading from stdin.
pub fn input_stem(params: &IoParameters) -> String {
    params
        .input
        .as_deref()
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .unwrap_or("structure")
        .to_string()
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Returns true when stdout is a TTY and no explicit output file was supplied.
pub fn interactive_stdout_requested(params: &IoParameters) -> bool {
    params.output.is_none() && stdio::stdout().is_terminal()
}

/// Ensures commands do not dump structured output directly into an interactive terminal.
pub fn ensure_noninteractive_stdout(command: &str, params: &IoParameters) -> Result<()> {
    if interactive_stdout_requested(params) {
        bail!(
            "Refusing to stream {command} results to an interactive terminal. Use -o/--output or pipe the command into a file."
        );
    }
    Ok(())
}
