//! Core data structures modeling structural-file records.
//!
//! This module defines the line-level record types and the fixed-column layout
//! table they are parsed from and serialized into. These types form the
//! backbone of `dock-forge` and are consumed and mutated by the I/O layer and
//! the preparation operations.

pub mod layout;
pub mod record;
