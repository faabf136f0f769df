//! The preparation pipeline's transformations.
//!
//! This module groups the public entry points for structural-record
//! processing: pose splitting, coordinate sanitization, ligand chain and
//! record-type normalization, complex merging, and cleaning/renumbering. Each
//! submodule exposes a pure function over in-memory records and shares a
//! common error type so workflows compose without surprises.

mod error;

pub mod clean;
pub mod merge;
pub mod normalize;
pub mod sanitize;
pub mod split;

pub use clean::{clean, CleanOptions, CleanOutcome, CleanReport};

pub use merge::merge;

pub use normalize::{assign_ligand_chain, collect_chain_ids, normalize_ligand};

pub use sanitize::{
    atom_within_bounds, is_smiles_debris, sanitize_line, sanitize_record, SanitizeConfig,
    DEFAULT_MAX_COORD,
};

pub use split::{split_poses, Pose};

pub use error::Error;
