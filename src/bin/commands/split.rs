use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use dock_forge::Record;
use dock_forge::io::write_pose_files;
use dock_forge::ops::split_poses;

use crate::commands::run_with_spinner;

/// Splits multi-model docking output into numbered per-pose files.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Directory the pose files are written into (created when missing).
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,
    /// Base name for pose files; defaults to the input file stem.
    #[arg(long, value_name = "NAME")]
    pub stem: Option<String>,
    /// Write a JSON manifest describing the produced poses.
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Manifest {
    stem: String,
    pose_count: usize,
    poses: Vec<ManifestPose>,
}

#[derive(Debug, Serialize)]
struct ManifestPose {
    number: usize,
    path: PathBuf,
    atoms: usize,
}

/// Splits the input stream and writes one file per pose.
pub fn run(records: Vec<Record>, input_stem: &str, args: &SplitArgs) -> Result<()> {
    let stem = args.stem.as_deref().unwrap_or(input_stem).to_string();

    let (poses, paths) = run_with_spinner("Splitting poses", || {
        let poses = split_poses(records);
        if poses.is_empty() {
            bail!("Input contains no poses (empty or header-only stream).");
        }
        let paths = write_pose_files(&args.out_dir, &stem, &poses)
            .with_context(|| format!("Failed to write poses into {}", args.out_dir.display()))?;
        Ok((poses, paths))
    })?;

    eprintln!("Wrote {} pose(s) into {}", poses.len(), args.out_dir.display());

    if let Some(manifest_path) = &args.manifest {
        let manifest = Manifest {
            stem,
            pose_count: poses.len(),
            poses: poses
                .iter()
                .zip(&paths)
                .map(|(pose, path)| ManifestPose {
                    number: pose.number,
                    path: path.clone(),
                    atoms: pose.records.iter().filter(|r| r.is_atom()).count(),
                })
                .collect(),
        };
        let file = std::fs::File::create(manifest_path)
            .with_context(|| format!("Failed to create manifest {}", manifest_path.display()))?;
        serde_json::to_writer_pretty(file, &manifest)
            .with_context(|| format!("Failed to write manifest {}", manifest_path.display()))?;
    }

    Ok(())
}
