//! Internal helpers shared across the crate.

pub mod parallel;
