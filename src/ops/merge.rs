//! Receptor + ligand complex assembly.
//!
//! The merger produces the single-model complex the interaction-analysis
//! stage consumes: receptor records first, one `TER` separator, then the
//! ligand coerced to HETATM on a collision-free chain, closed by one `END`.
//! It never invents or discards atoms; only delimiter and bond lines are
//! dropped.

use crate::model::record::{Record, RecordType};
use crate::ops::error::Error;
use crate::ops::normalize::{assign_ligand_chain, collect_chain_ids};
use std::collections::HashSet;

/// Merges two structures into one single-model complex.
///
/// The ligand chain is chosen against the receptor's chain set, honoring
/// `preferred_chain` when unclaimed. Ligand atoms already normalized by the
/// chain/record-type stage come through unchanged when their chain is still
/// collision-free; anything else is coerced here.
///
/// # Errors
///
/// [`Error::ChainIdsExhausted`] when the receptor claims all 26 chain ids.
pub fn merge(
    receptor: &[Record],
    ligand: &[Record],
    preferred_chain: Option<char>,
) -> Result<Vec<Record>, Error> {
    let receptor_chains: HashSet<char> = collect_chain_ids(receptor);
    let ligand_chain = assign_ligand_chain(&receptor_chains, preferred_chain)?;

    let mut merged = Vec::with_capacity(receptor.len() + ligand.len() + 2);

    for record in receptor {
        if keep_in_complex(record) {
            merged.push(record.clone());
        }
    }

    merged.push(Record::Other("TER".to_string()));

    for record in ligand {
        if !keep_in_complex(record) {
            continue;
        }
        match record {
            Record::Atom(atom) => {
                let mut atom = atom.clone();
                atom.record_type = RecordType::Hetatm;
                atom.chain_id = ligand_chain;
                merged.push(Record::Atom(atom));
            }
            other => merged.push(other.clone()),
        }
    }

    merged.push(Record::Other("END".to_string()));

    Ok(merged)
}

/// The complex is single-model with its own separator and terminator, so
/// wrapping delimiters, old terminators, and bond lines are dropped. Every
/// other record passes through.
fn keep_in_complex(record: &Record) -> bool {
    match record {
        Record::ModelStart(_) | Record::ModelEnd(_) | Record::Conect(_) => false,
        Record::Other(text) => {
            let keyword = text.trim().to_ascii_uppercase();
            !(keyword.starts_with("TER") || keyword.starts_with("END"))
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pdb::reader::read;
    use crate::model::record::RecordType;
    use std::io::Cursor;

    fn receptor() -> Vec<Record> {
        let input = "\
REMARK receptor
ATOM      1  N   ALA A   1      11.000  12.000  13.000  1.00  0.00           N
ATOM      2  CA  ALA A   1      12.000  12.500  13.000  1.00  0.00           C
ATOM      3  N   GLY B   1      20.000  21.000  22.000  1.00  0.00           N
TER
END
";
        read(Cursor::new(input)).unwrap()
    }

    fn ligand() -> Vec<Record> {
        let input = "\
MODEL 1
ATOM      1  C1  LIG A   1      10.000  10.000  10.000  0.00  0.00    +0.123 C
ATOM      2  O1  LIG A   1      11.000  10.000  10.000  0.00  0.00    -0.400 O
CONECT    1    2
ENDMDL
";
        read(Cursor::new(input)).unwrap()
    }

    fn atom_count(records: &[Record]) -> usize {
        records.iter().filter(|r| r.is_atom()).count()
    }

    #[test]
    fn merge_conserves_atom_count() {
        let receptor = receptor();
        let ligand = ligand();
        let merged = merge(&receptor, &ligand, None).unwrap();

        assert_eq!(
            atom_count(&merged),
            atom_count(&receptor) + atom_count(&ligand)
        );
    }

    #[test]
    fn receptor_atoms_come_first_and_are_verbatim() {
        let receptor = receptor();
        let merged = merge(&receptor, &ligand(), None).unwrap();

        let receptor_atoms: Vec<_> = receptor.iter().filter(|r| r.is_atom()).collect();
        let merged_receptor_atoms: Vec<_> =
            merged.iter().filter(|r| r.is_atom()).take(3).collect();
        assert_eq!(receptor_atoms, merged_receptor_atoms);
    }

    #[test]
    fn single_ter_separates_receptor_from_ligand() {
        let merged = merge(&receptor(), &ligand(), None).unwrap();

        let ter_positions: Vec<usize> = merged
            .iter()
            .enumerate()
            .filter(|(_, r)| matches!(r, Record::Other(t) if t.trim() == "TER"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(ter_positions.len(), 1);

        // Every record before the TER that is an atom belongs to the receptor.
        let ter = ter_positions[0];
        assert_eq!(atom_count(&merged[..ter]), 3);
        assert_eq!(atom_count(&merged[ter..]), 2);
    }

    #[test]
    fn ligand_atoms_are_hetatm_on_a_fresh_chain() {
        let merged = merge(&receptor(), &ligand(), None).unwrap();

        let ligand_atoms: Vec<_> = merged
            .iter()
            .filter_map(Record::as_atom)
            .filter(|a| a.record_type == RecordType::Hetatm)
            .collect();

        assert_eq!(ligand_atoms.len(), 2);
        for atom in ligand_atoms {
            // Receptor claims A and B; the scan lands on C.
            assert_eq!(atom.chain_id, 'C');
        }
    }

    #[test]
    fn preferred_chain_is_honored_when_free() {
        let merged = merge(&receptor(), &ligand(), Some('L')).unwrap();
        let chains: HashSet<char> = merged
            .iter()
            .filter_map(Record::as_atom)
            .filter(|a| a.record_type == RecordType::Hetatm)
            .map(|a| a.chain_id)
            .collect();
        assert_eq!(chains, HashSet::from(['L']));
    }

    #[test]
    fn delimiters_bonds_and_old_terminators_are_dropped() {
        let merged = merge(&receptor(), &ligand(), None).unwrap();

        assert!(!merged
            .iter()
            .any(|r| matches!(r, Record::ModelStart(_) | Record::ModelEnd(_) | Record::Conect(_))));

        let end_count = merged.iter().filter(|r| r.is_end()).count();
        assert_eq!(end_count, 1);
        assert_eq!(merged.last(), Some(&Record::Other("END".to_string())));
    }

    #[test]
    fn remark_lines_survive_the_merge() {
        let merged = merge(&receptor(), &ligand(), None).unwrap();
        assert!(merged.contains(&Record::Other("REMARK receptor".to_string())));
    }

    #[test]
    fn exhausted_receptor_chains_fail_fatally() {
        let mut receptor = Vec::new();
        for (i, chain) in ('A'..='Z').enumerate() {
            let line = format!(
                "ATOM  {:>5}  CA  ALA {}   1      11.000  12.000  13.000  1.00  0.00           C",
                i + 1,
                chain
            );
            receptor.push(crate::io::pdb::reader::parse_line(&line));
        }

        assert_eq!(
            merge(&receptor, &ligand(), Some('L')),
            Err(Error::ChainIdsExhausted)
        );
    }
}
