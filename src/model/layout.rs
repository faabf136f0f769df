//! Fixed-column layout of ATOM/HETATM records in the legacy PDB convention.
//!
//! Docking tools and their converters encode the column contract implicitly at
//! every slicing call site. Here the contract is stated once as a constant
//! table; the parser ([`crate::io::pdb::reader`]) and serializer
//! ([`crate::io::pdb::writer`]) both consult it, which makes round-tripping a
//! correctly justified atom line an identity operation.
//!
//! Ranges are zero-based byte offsets into the line. The PDB documentation
//! numbers the same columns one-based, so e.g. `CHAIN_ID` below is "column 22"
//! in format-spec parlance.

use std::ops::Range;

/// Record-type keyword, left-justified (`ATOM  `, `HETATM`, `CONECT`, ...).
pub const RECORD_NAME: Range<usize> = 0..6;

/// Atom serial number, right-justified.
pub const ATOM_SERIAL: Range<usize> = 6..11;

/// Atom name, alternate-location indicator, and residue name, kept as an
/// opaque segment: the pipeline never rewrites these fields.
pub const ATOM_LABEL: Range<usize> = 11..21;

/// Chain identifier, a single character.
pub const CHAIN_ID: usize = 21;

/// Residue sequence number, right-justified.
pub const RES_SEQ: Range<usize> = 22..26;

/// Insertion code, a single character or blank.
pub const INSERTION_CODE: usize = 26;

/// Unused columns between the insertion code and the coordinate block.
pub const SPACER: Range<usize> = 27..30;

/// Orthogonal coordinates, `%8.3f` each.
pub const COORD_X: Range<usize> = 30..38;
pub const COORD_Y: Range<usize> = 38..46;
pub const COORD_Z: Range<usize> = 46..54;

/// Everything after the coordinates (occupancy, temperature factor, element,
/// charge, and the PDBQT partial-charge/type extras) is carried verbatim.
pub const TRAILER_START: usize = 54;

/// Shortest line that still contains the full coordinate block.
pub const MIN_ATOM_LINE: usize = COORD_Z.end;
