//! Line-level PDB/PDBQT parsing.
//!
//! The parser is total: it classifies every line into a [`Record`] and never
//! fails on content. ATOM/HETATM lines that do not honor the fixed-column
//! contract become [`Record::Malformed`] sentinels for the sanitizer to drop,
//! because docking engines and converters routinely emit slightly
//! non-conformant records and a hard parse error would reject whole files
//! over one bad line.

use crate::io::error::Error;
use crate::model::layout;
use crate::model::record::{AtomRecord, ConectRecord, Record, RecordType};
use smol_str::SmolStr;
use std::io::BufRead;
use std::ops::Range;

/// Reads a whole structural stream into an ordered record sequence.
///
/// Carriage returns left over from Windows line endings are stripped so the
/// column arithmetic stays byte-exact.
///
/// # Errors
///
/// Returns [`Error::Io`] when the underlying reader fails. Malformed content
/// is never an error; it surfaces as [`Record::Malformed`] entries.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Record>, Error> {
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::from_io(e, None))?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        records.push(parse_line(line));
    }

    Ok(records)
}

/// Classifies and parses a single structural-file line.
///
/// Record keywords are matched the way the docking ecosystem writes them:
/// ATOM/HETATM/CONECT anchored at column 1, MODEL/ENDMDL tolerated with
/// leading whitespace and any case. Everything else passes through as an
/// opaque line.
pub fn parse_line(line: &str) -> Record {
    if line.starts_with("ATOM") || line.starts_with("HETATM") {
        return parse_atom_line(line);
    }

    if line.starts_with("CONECT") {
        return parse_conect_line(line);
    }

    let keyword = line.trim().to_ascii_uppercase();
    if keyword.starts_with("ENDMDL") {
        return Record::ModelEnd(line.to_string());
    }
    if keyword.starts_with("MODEL") {
        return Record::ModelStart(line.to_string());
    }

    Record::Other(line.to_string())
}

fn parse_atom_line(line: &str) -> Record {
    if line.len() < layout::MIN_ATOM_LINE {
        return Record::Malformed(line.to_string());
    }

    let record_type = if line.starts_with("HETATM") {
        RecordType::Hetatm
    } else {
        RecordType::Atom
    };

    let serial = match parse_field::<u32>(line, layout::ATOM_SERIAL) {
        Some(serial) => serial,
        None => return Record::Malformed(line.to_string()),
    };
    let res_seq = match parse_field::<i32>(line, layout::RES_SEQ) {
        Some(res_seq) => res_seq,
        None => return Record::Malformed(line.to_string()),
    };

    let (x, y, z) = match (
        parse_field::<f64>(line, layout::COORD_X),
        parse_field::<f64>(line, layout::COORD_Y),
        parse_field::<f64>(line, layout::COORD_Z),
    ) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Record::Malformed(line.to_string()),
    };

    let (label, chain_id, i_code, spacer) = match (
        field(line, layout::ATOM_LABEL),
        char_at(line, layout::CHAIN_ID),
        char_at(line, layout::INSERTION_CODE),
        field(line, layout::SPACER),
    ) {
        (Some(label), Some(chain_id), Some(i_code), Some(spacer)) => {
            (label, chain_id, i_code, spacer)
        }
        _ => return Record::Malformed(line.to_string()),
    };

    Record::Atom(AtomRecord {
        record_type,
        serial,
        label: SmolStr::new(label),
        chain_id,
        res_seq,
        i_code: if i_code == ' ' { None } else { Some(i_code) },
        spacer: SmolStr::new(spacer),
        pos: crate::model::record::Point::new(x, y, z),
        trailer: line[layout::TRAILER_START..].to_string(),
    })
}

fn parse_conect_line(line: &str) -> Record {
    // Non-numeric tokens are skipped; bond topology is advisory downstream.
    let refs = line[layout::RECORD_NAME.end..]
        .split_whitespace()
        .filter_map(|token| token.parse::<u32>().ok())
        .collect();

    Record::Conect(ConectRecord { refs })
}

fn field(line: &str, range: Range<usize>) -> Option<&str> {
    line.get(range)
}

fn char_at(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1).and_then(|s| s.chars().next())
}

fn parse_field<T: std::str::FromStr>(line: &str, range: Range<usize>) -> Option<T> {
    field(line, range).and_then(|s| s.trim().parse::<T>().ok())
}
