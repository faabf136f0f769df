//! Ligand chain and record-type normalization.
//!
//! Docking tools frequently mislabel ligand atoms as `ATOM` and leave them on
//! whatever chain the input happened to carry. Interaction-analysis tools
//! classify ligand versus receptor by the HETATM marker and need a chain id
//! that uniquely identifies the ligand, so both are rewritten here. Residue
//! numbering and insertion codes are deliberately left alone: renumbering at
//! this stage desynchronizes tools that match residues by original numbering,
//! and is the cleaner's job when requested.

use crate::model::record::{Record, RecordType};
use crate::ops::error::Error;
use std::collections::HashSet;

/// Collects every chain identifier carried by well-formed atom records.
pub fn collect_chain_ids(records: &[Record]) -> HashSet<char> {
    records
        .iter()
        .filter_map(|record| record.as_atom().map(|atom| atom.chain_id))
        .collect()
}

/// Picks a ligand chain id that cannot collide with the given chain set.
///
/// The preferred chain wins when supplied and unclaimed; otherwise the first
/// unused letter in the fixed scan order `A..=Z` is taken.
///
/// # Errors
///
/// [`Error::ChainIdsExhausted`] when all 26 letters are claimed. Silently
/// reusing a receptor chain would misattribute ligand contacts downstream, so
/// this is fatal for the ligand.
pub fn assign_ligand_chain(
    taken: &HashSet<char>,
    preferred: Option<char>,
) -> Result<char, Error> {
    if let Some(chain) = preferred {
        if !taken.contains(&chain) {
            return Ok(chain);
        }
    }

    ('A'..='Z')
        .find(|candidate| !taken.contains(candidate))
        .ok_or(Error::ChainIdsExhausted)
}

/// Forces every atom record to `HETATM` and rewrites its chain id.
///
/// The chain is chosen with [`assign_ligand_chain`] against the paired
/// receptor's chain set and returned so callers can report it. Non-atom lines
/// and malformed sentinels are left untouched.
///
/// # Errors
///
/// Propagates [`Error::ChainIdsExhausted`] from chain assignment.
pub fn normalize_ligand(
    records: &mut [Record],
    receptor_chains: &HashSet<char>,
    preferred: Option<char>,
) -> Result<char, Error> {
    let chain = assign_ligand_chain(receptor_chains, preferred)?;

    for record in records.iter_mut() {
        if let Some(atom) = record.as_atom_mut() {
            atom.record_type = RecordType::Hetatm;
            atom.chain_id = chain;
        }
    }

    Ok(chain)
}
