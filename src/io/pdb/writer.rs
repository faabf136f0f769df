//! Record serialization and structural-file output.
//!
//! The serializer consults the same column table as the parser
//! ([`crate::model::layout`]): parsed fields are re-justified exactly as the
//! legacy format requires, raw segments are copied back verbatim, and a
//! correctly justified atom line round-trips byte-for-byte.

use crate::io::error::Error;
use crate::model::record::Record;
use crate::ops::split::Pose;
use crate::utils::parallel::*;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Renders one record back into its line form, without a trailing newline.
pub fn serialize_record(record: &Record) -> String {
    match record {
        Record::Atom(atom) => format!(
            "{}{:>5}{:<10}{}{:>4}{}{:<3}{:8.3}{:8.3}{:8.3}{}",
            atom.record_type.keyword(),
            atom.serial,
            atom.label,
            atom.chain_id,
            atom.res_seq,
            atom.i_code.unwrap_or(' '),
            atom.spacer,
            atom.pos.x,
            atom.pos.y,
            atom.pos.z,
            atom.trailer
        ),
        Record::Conect(conect) => {
            let mut line = String::from("CONECT");
            for serial in &conect.refs {
                line.push_str(&format!("{serial:>5}"));
            }
            line
        }
        Record::ModelStart(raw)
        | Record::ModelEnd(raw)
        | Record::Other(raw)
        | Record::Malformed(raw) => raw.clone(),
    }
}

/// Writes an ordered record sequence to the given sink, one line per record.
///
/// # Errors
///
/// Returns [`Error::Io`] when the sink fails.
pub fn write<W: Write>(mut writer: W, records: &[Record]) -> Result<(), Error> {
    for record in records {
        writeln!(writer, "{}", serialize_record(record)).map_err(|e| Error::from_io(e, None))?;
    }
    Ok(())
}

/// Writes each pose to `{stem}_pose_{n}.pdbqt` inside `dir`, creating the
/// directory when needed.
///
/// Poses are independent of one another, so the files are written in parallel
/// when the `parallel` feature is enabled. The returned paths follow pose
/// numbering order regardless of completion order.
///
/// # Errors
///
/// Returns [`Error::Io`] carrying the offending path when directory creation
/// or any file write fails.
pub fn write_pose_files(dir: &Path, stem: &str, poses: &[Pose]) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(dir).map_err(|e| Error::from_io(e, Some(dir.to_path_buf())))?;

    poses
        .par_iter()
        .map(|pose| {
            let path = dir.join(format!("{}_pose_{}.pdbqt", stem, pose.number));
            let file =
                File::create(&path).map_err(|e| Error::from_io(e, Some(path.clone())))?;
            let mut writer = BufWriter::new(file);
            write(&mut writer, &pose.records)?;
            writer
                .flush()
                .map_err(|e| Error::from_io(e, Some(path.clone())))?;
            Ok(path)
        })
        .collect()
}
