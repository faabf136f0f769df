use thiserror::Error;

/// Fatal preparation failures.
///
/// Everything else in the pipeline resolves locally by dropping the offending
/// record; these two conditions mean no trustworthy output can be produced and
/// must reach the caller as typed errors rather than as a superficially valid
/// file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no atom records survived sanitization ({rejected} rejected); structure is not salvageable")]
    NoAtomsRemaining { rejected: usize },

    #[error("all 26 chain identifiers are already in use; cannot assign a unique ligand chain")]
    ChainIdsExhausted,
}

impl Error {
    pub fn no_atoms_remaining(rejected: usize) -> Self {
        Self::NoAtomsRemaining { rejected }
    }
}
