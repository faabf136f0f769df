//! # DockForge
//!
//! **DockForge** is a pure-Rust preparation engine for the structural text files that flow through molecular docking pipelines. It ingests receptor and ligand coordinate files in the relaxed PDB/PDBQT dialects docking tools actually emit, and produces clean, consistent, analysis-ready structures. The crate favors pure transformations, strong typing, and clean error surfaces so an off-by-one in a fixed-width column can never silently corrupt scientific output.
//!
//! ## Features
//!
//! - **Fixed-column record model** – A single column-layout table backs both parsing and serialization, so the two are provably inverse operations and every byte outside the understood fields survives write-back untouched.
//! - **Tolerant parsing** – Slightly non-conformant ATOM/HETATM lines become droppable sentinels instead of hard errors, matching the reality of docking-engine output.
//! - **Pose splitting** – Multi-model docking output is split into numbered, self-contained pose files with shared-header propagation and synthesized terminators for interrupted runs.
//! - **Chain and record-type normalization** – Ligand atoms are coerced to HETATM and assigned a chain identifier guaranteed not to collide with the paired receptor.
//! - **Complex assembly and cleanup** – Receptor and ligand merge into a single-model complex, and the cleaner re-sanitizes coordinates, strips wrapping, and optionally renumbers serials and residues while keeping CONECT records internally consistent.

mod model;

pub mod io;
pub mod ops;
pub mod utils;

pub use model::layout;
pub use model::record::{AtomRecord, ConectRecord, Point, Record, RecordType};
pub use ops::Pose;
