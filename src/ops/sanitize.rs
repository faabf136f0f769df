//! Per-record coordinate validation.
//!
//! Docking output is the wild west of the PDB convention: truncated lines,
//! unparsable floats, and runaway coordinates all occur in practice and none
//! of them should take down a whole job. The sanitizer gives a pure verdict
//! per line; dropping is the caller's (cleaner's) responsibility.

use crate::io::pdb::reader::parse_line;
use crate::model::record::{AtomRecord, Record};

/// Magnitude bound applied to every coordinate, in ångströms.
///
/// A sanity guard against corrupted docking output, not a physical law; no
/// real docking box approaches this size.
pub const DEFAULT_MAX_COORD: f64 = 500.0;

/// Tuning knobs for coordinate validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SanitizeConfig {
    /// Maximum allowed `|x|`, `|y|`, `|z|` for a retained atom record.
    pub max_coord: f64,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_coord: DEFAULT_MAX_COORD,
        }
    }
}

/// Validates one line, returning its record when it should be retained.
///
/// Non-atom lines always pass through. Atom lines are rejected when they are
/// too short to contain the coordinate columns, when any coordinate fails to
/// parse as a finite float, or when a coordinate's magnitude exceeds the
/// configured bound. Pure and total: the same input always yields the same
/// verdict and no input panics.
pub fn sanitize_line(line: &str, config: &SanitizeConfig) -> Option<Record> {
    sanitize_record(parse_line(line), config)
}

/// Record-level counterpart of [`sanitize_line`] for already-parsed input.
pub fn sanitize_record(record: Record, config: &SanitizeConfig) -> Option<Record> {
    match record {
        Record::Malformed(_) => None,
        Record::Atom(atom) if !atom_within_bounds(&atom, config) => None,
        keep => Some(keep),
    }
}

/// True when all three coordinates are finite and within the configured bound.
pub fn atom_within_bounds(atom: &AtomRecord, config: &SanitizeConfig) -> bool {
    atom.has_finite_coords()
        && atom.pos.x.abs() <= config.max_coord
        && atom.pos.y.abs() <= config.max_coord
        && atom.pos.z.abs() <= config.max_coord
}

/// Heuristic for stray SMILES strings that format converters occasionally
/// leave behind in PDB output. Matches explicit SMILES prefixes, stereo
/// bracket atoms, and long unspaced bracket-heavy strings on lines that carry
/// no known record keyword.
pub fn is_smiles_debris(line: &str) -> bool {
    let stripped = line.trim();
    if stripped.is_empty() {
        return false;
    }

    if stripped.starts_with("SMILES") || stripped.to_ascii_lowercase().starts_with("smiles:") {
        return true;
    }

    if line.contains("[C@@H]") || line.contains("[C@H]") || line.contains("[@") {
        return true;
    }

    const KNOWN_KEYWORDS: [&str; 11] = [
        "ATOM", "HETATM", "TER", "END", "MODEL", "ENDMDL", "CONECT", "REMARK", "HEADER", "TITLE",
        "CRYST",
    ];
    if KNOWN_KEYWORDS.iter().any(|kw| stripped.starts_with(kw)) {
        return false;
    }

    stripped.len() > 50
        && stripped.matches('(').count() + stripped.matches('[').count() > 5
        && stripped.matches(' ').count() < 3
}
