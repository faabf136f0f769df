//! Typed representation of a single structural-file line.
//!
//! This module defines the smallest unit the pipeline operates on. Records are
//! produced by the PDB reader, transformed by the operations under
//! [`crate::ops`], and rendered back by the PDB writer. The atom variant keeps
//! the fields the pipeline rewrites (record type, serial, chain, residue
//! sequence, coordinates) parsed, and carries every other column as an opaque
//! segment so write-back is byte-faithful.

use smol_str::SmolStr;
use std::fmt;

/// Cartesian coordinates measured in ångströms.
pub type Point = nalgebra::Point3<f64>;

/// Record-type keyword distinguishing polymer atoms from heteroatoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Standard polymer (protein/nucleic-acid) atom.
    Atom,
    /// Heteroatom: ligands, ions, waters. Docking ligands are forced to this.
    Hetatm,
}

impl RecordType {
    /// The six-column keyword as it appears in the file.
    pub fn keyword(&self) -> &'static str {
        match self {
            RecordType::Atom => "ATOM  ",
            RecordType::Hetatm => "HETATM",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword().trim_end())
    }
}

/// Parsed ATOM/HETATM line.
///
/// `label`, `spacer`, and `trailer` hold the raw column segments the pipeline
/// never re-derives (atom name, alt-loc, residue name; the gap before the
/// coordinate block; occupancy, B-factor, element, charge, and any PDBQT
/// extras). They are written back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// ATOM vs HETATM marker.
    pub record_type: RecordType,
    /// Atom serial number.
    pub serial: u32,
    /// Columns between the serial and the chain id, kept opaque.
    pub label: SmolStr,
    /// Single-character chain identifier (may be blank).
    pub chain_id: char,
    /// Residue sequence number within the chain.
    pub res_seq: i32,
    /// Insertion code, when present.
    pub i_code: Option<char>,
    /// Unused columns between the insertion code and the coordinates.
    pub spacer: SmolStr,
    /// Orthogonal coordinates in ångströms.
    pub pos: Point,
    /// Everything after the coordinate block, kept opaque.
    pub trailer: String,
}

impl AtomRecord {
    /// Atom name sliced out of the opaque label segment, for reporting only.
    pub fn atom_name(&self) -> &str {
        slice_trimmed(&self.label, 1, 5)
    }

    /// Residue name sliced out of the opaque label segment, for reporting only.
    pub fn res_name(&self) -> &str {
        slice_trimmed(&self.label, 6, 9)
    }

    /// True when all three coordinates are finite (not NaN, not infinite).
    pub fn has_finite_coords(&self) -> bool {
        self.pos.x.is_finite() && self.pos.y.is_finite() && self.pos.z.is_finite()
    }
}

fn slice_trimmed(segment: &str, start: usize, end: usize) -> &str {
    let end = end.min(segment.len());
    let start = start.min(end);
    segment.get(start..end).map(str::trim).unwrap_or("")
}

impl fmt::Display for AtomRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{} {}{} [{:.3}, {:.3}, {:.3}]",
            self.record_type,
            self.serial,
            self.res_name(),
            self.atom_name(),
            self.chain_id,
            self.res_seq,
            self.pos.x,
            self.pos.y,
            self.pos.z
        )
    }
}

/// CONECT bond line. The first reference is the owning atom; the remaining
/// references are its bonded partners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConectRecord {
    pub refs: Vec<u32>,
}

/// One line of a structural file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Fully parsed ATOM/HETATM line.
    Atom(AtomRecord),
    /// CONECT bond line.
    Conect(ConectRecord),
    /// MODEL delimiter opening a pose. The raw line is kept because docking
    /// engines disagree on the serial's justification.
    ModelStart(String),
    /// ENDMDL delimiter closing a pose.
    ModelEnd(String),
    /// Any other line (REMARK, TER, END, headers), passed through unchanged.
    Other(String),
    /// An ATOM/HETATM line whose fields could not be parsed. Docking tools
    /// emit slightly non-conformant records, so this is a droppable sentinel
    /// consumed by the sanitizer, not a hard error.
    Malformed(String),
}

impl Record {
    /// Synthetic pose terminator.
    pub fn model_end() -> Self {
        Record::ModelEnd("ENDMDL".to_string())
    }

    /// True for well-formed atom records.
    pub fn is_atom(&self) -> bool {
        matches!(self, Record::Atom(_))
    }

    /// True for any line that claims to be an atom record, parseable or not.
    pub fn is_atom_like(&self) -> bool {
        matches!(self, Record::Atom(_) | Record::Malformed(_))
    }

    /// Borrow the atom record, when this is one.
    pub fn as_atom(&self) -> Option<&AtomRecord> {
        match self {
            Record::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Mutably borrow the atom record, when this is one.
    pub fn as_atom_mut(&mut self) -> Option<&mut AtomRecord> {
        match self {
            Record::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// True for opaque lines that are empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        matches!(self, Record::Other(text) if text.trim().is_empty())
    }

    /// True for opaque lines carrying an END (but not ENDMDL) terminator.
    pub fn is_end(&self) -> bool {
        matches!(self, Record::Other(text) if text.trim().to_ascii_uppercase().starts_with("END"))
    }
}
