//! Pre-analysis cleanup and renumbering.
//!
//! The cleaner turns an assembled complex (or any single structure) into the
//! strict form the interaction-analysis stage expects: no model wrapping, no
//! stale bond lines, only sane coordinates, and a final `END`. The stricter
//! variant additionally renumbers atom serials densely and residue sequence
//! numbers per chain, rewriting CONECT references through the old→new serial
//! map so no dangling bond reference survives.
//!
//! Whether the downstream tool actually needs residue renumbering is an open
//! question inherited from field use; both behaviors are kept behind the
//! explicit `renumber` switch instead of guessing a default.

use crate::model::record::Record;
use crate::ops::error::Error;
use crate::ops::sanitize::{atom_within_bounds, is_smiles_debris, SanitizeConfig};
use std::collections::HashMap;

/// Switches for one cleaning run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanOptions {
    /// Renumber serials and per-chain residues, remapping CONECT references.
    /// When off, CONECT lines are dropped outright: a stale bond reference is
    /// more dangerous than an absent one.
    pub renumber: bool,
    /// Coordinate bounds re-applied to every atom record.
    pub sanitize: SanitizeConfig,
}

/// What one cleaning run did, for reporting at the pipeline boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Atom records retained in the output.
    pub atoms_kept: usize,
    /// Atom records rejected by sanitization (malformed or out of bounds).
    pub atoms_dropped: usize,
    /// Stray SMILES lines removed.
    pub debris_dropped: usize,
    /// Whole CONECT lines removed.
    pub bonds_dropped: usize,
    /// Individual CONECT references that could not be remapped.
    pub bond_refs_dropped: usize,
}

/// A cleaned record sequence together with its report.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    pub records: Vec<Record>,
    pub report: CleanReport,
}

/// Cleans a record sequence for downstream analysis.
///
/// Always: model delimiters are dropped while the content they wrapped is
/// kept at top level (the cleaner tolerates un-split input), every atom is
/// re-sanitized, SMILES debris lines are removed, trailing blank lines are
/// stripped, and the output ends with exactly one `END`.
///
/// With `renumber` off, every CONECT line is dropped. With `renumber` on,
/// atom serials are reassigned densely from 1 in file order, residue sequence
/// numbers are reassigned densely from 1 per chain keyed by
/// `(res_seq, insertion code)` so multi-atom residues stay together, and
/// CONECT references are mapped through the old→new serial table, dropping
/// any reference that does not resolve and any bond line left empty.
///
/// # Errors
///
/// [`Error::NoAtomsRemaining`] when sanitization rejects every atom record; a
/// structure with nothing left is reported rather than written out as an
/// empty, superficially valid file.
pub fn clean(records: Vec<Record>, options: &CleanOptions) -> Result<CleanOutcome, Error> {
    let mut kept: Vec<Record> = Vec::with_capacity(records.len());
    let mut report = CleanReport::default();

    for record in records {
        match record {
            Record::ModelStart(_) | Record::ModelEnd(_) => {}
            Record::Malformed(_) => report.atoms_dropped += 1,
            Record::Atom(atom) => {
                if atom_within_bounds(&atom, &options.sanitize) {
                    report.atoms_kept += 1;
                    kept.push(Record::Atom(atom));
                } else {
                    report.atoms_dropped += 1;
                }
            }
            Record::Conect(conect) => {
                if options.renumber {
                    kept.push(Record::Conect(conect));
                } else {
                    report.bonds_dropped += 1;
                }
            }
            Record::Other(text) => {
                if is_smiles_debris(&text) {
                    report.debris_dropped += 1;
                } else {
                    kept.push(Record::Other(text));
                }
            }
        }
    }

    if report.atoms_kept == 0 {
        return Err(Error::no_atoms_remaining(report.atoms_dropped));
    }

    if options.renumber {
        renumber_records(&mut kept, &mut report);
    }

    while kept.last().is_some_and(Record::is_blank) {
        kept.pop();
    }
    if !kept.last().is_some_and(Record::is_end) {
        kept.push(Record::Other("END".to_string()));
    }

    Ok(CleanOutcome {
        records: kept,
        report,
    })
}

fn renumber_records(records: &mut Vec<Record>, report: &mut CleanReport) {
    let mut serial_map: HashMap<u32, u32> = HashMap::new();
    let mut next_serial: u32 = 1;

    // Residue keys collapse per (seq, insertion code) so multi-atom residues
    // share their new number; counters run independently per chain.
    let mut residue_maps: HashMap<char, HashMap<(i32, Option<char>), i32>> = HashMap::new();
    let mut residue_counters: HashMap<char, i32> = HashMap::new();

    for record in records.iter_mut() {
        if let Some(atom) = record.as_atom_mut() {
            let new_serial = next_serial;
            next_serial += 1;
            // Duplicate input serials occur in merged complexes; the first
            // occurrence wins the CONECT mapping.
            serial_map.entry(atom.serial).or_insert(new_serial);
            atom.serial = new_serial;

            let chain_map = residue_maps.entry(atom.chain_id).or_default();
            let counter = residue_counters.entry(atom.chain_id).or_insert(1);
            let new_seq = *chain_map
                .entry((atom.res_seq, atom.i_code))
                .or_insert_with(|| {
                    let seq = *counter;
                    *counter += 1;
                    seq
                });
            atom.res_seq = new_seq;
        }
    }

    records.retain_mut(|record| {
        if let Record::Conect(conect) = record {
            let before = conect.refs.len();
            conect.refs.retain(|serial| serial_map.contains_key(serial));
            for serial in conect.refs.iter_mut() {
                *serial = serial_map[serial];
            }
            report.bond_refs_dropped += before - conect.refs.len();
            if conect.refs.is_empty() {
                report.bonds_dropped += 1;
                return false;
            }
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pdb::reader::read;
    use std::collections::HashSet;
    use std::io::Cursor;

    fn parse(input: &str) -> Vec<Record> {
        read(Cursor::new(input)).unwrap()
    }

    fn atom_line(serial: u32, chain: char, res_seq: i32, x: f64) -> String {
        format!(
            "ATOM  {serial:>5}  C1  LIG {chain}{res_seq:>4}    {x:8.3}  10.000  10.000  1.00  0.00           C"
        )
    }

    fn output_serials(records: &[Record]) -> Vec<u32> {
        records
            .iter()
            .filter_map(|r| r.as_atom().map(|a| a.serial))
            .collect()
    }

    #[test]
    fn simple_clean_drops_conect_and_appends_end() {
        let input = format!("{}\n{}\nCONECT    1    2\n", atom_line(1, 'A', 1, 1.0), atom_line(2, 'A', 1, 2.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        assert!(!outcome.records.iter().any(|r| matches!(r, Record::Conect(_))));
        assert_eq!(outcome.report.bonds_dropped, 1);
        assert_eq!(outcome.records.last(), Some(&Record::Other("END".to_string())));
        assert_eq!(outcome.report.atoms_kept, 2);
    }

    #[test]
    fn simple_clean_preserves_numbering() {
        let input = format!("{}\n{}\n", atom_line(40, 'A', 7, 1.0), atom_line(41, 'A', 8, 2.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        assert_eq!(output_serials(&outcome.records), vec![40, 41]);
        let seqs: Vec<i32> = outcome
            .records
            .iter()
            .filter_map(|r| r.as_atom().map(|a| a.res_seq))
            .collect();
        assert_eq!(seqs, vec![7, 8]);
    }

    #[test]
    fn model_wrapping_is_removed_without_losing_content() {
        let input = format!("MODEL 1\n{}\nENDMDL\n", atom_line(1, 'A', 1, 1.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        assert_eq!(outcome.report.atoms_kept, 1);
        assert!(!outcome
            .records
            .iter()
            .any(|r| matches!(r, Record::ModelStart(_) | Record::ModelEnd(_))));
    }

    #[test]
    fn resanitization_drops_out_of_bounds_atoms() {
        let input = format!("{}\n{}\n", atom_line(1, 'A', 1, 9999.999), atom_line(2, 'A', 1, 2.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        assert_eq!(outcome.report.atoms_kept, 1);
        assert_eq!(outcome.report.atoms_dropped, 1);
        assert_eq!(output_serials(&outcome.records), vec![2]);
    }

    #[test]
    fn all_atoms_rejected_is_a_typed_error() {
        let input = format!("REMARK junk\n{}\n", atom_line(1, 'A', 1, 9999.999));
        let result = clean(parse(&input), &CleanOptions::default());
        assert_eq!(result, Err(Error::NoAtomsRemaining { rejected: 1 }));
    }

    #[test]
    fn atom_free_input_is_a_typed_error() {
        let result = clean(parse("REMARK only\nTER\n"), &CleanOptions::default());
        assert_eq!(result, Err(Error::NoAtomsRemaining { rejected: 0 }));
    }

    #[test]
    fn trailing_blank_lines_are_stripped_before_end() {
        let input = format!("{}\n\n   \n", atom_line(1, 'A', 1, 1.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records.last(), Some(&Record::Other("END".to_string())));
    }

    #[test]
    fn existing_end_is_not_duplicated() {
        let input = format!("{}\nEND\n", atom_line(1, 'A', 1, 1.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        let ends = outcome.records.iter().filter(|r| r.is_end()).count();
        assert_eq!(ends, 1);
    }

    #[test]
    fn smiles_debris_lines_are_removed() {
        let input = format!("SMILES CC(=O)Oc1ccccc1\n{}\n", atom_line(1, 'A', 1, 1.0));
        let outcome = clean(parse(&input), &CleanOptions::default()).unwrap();

        assert_eq!(outcome.report.debris_dropped, 1);
        assert!(!outcome
            .records
            .iter()
            .any(|r| matches!(r, Record::Other(t) if t.contains("SMILES"))));
    }

    #[test]
    fn renumber_assigns_dense_serials_from_one() {
        let input = format!(
            "{}\n{}\n{}\n",
            atom_line(10, 'A', 5, 1.0),
            atom_line(300, 'A', 5, 2.0),
            atom_line(7, 'B', 9, 3.0)
        );
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        assert_eq!(output_serials(&outcome.records), vec![1, 2, 3]);
    }

    #[test]
    fn renumber_density_holds_with_duplicate_input_serials() {
        // Merged complexes restart ligand serials at 1.
        let input = format!(
            "{}\n{}\n{}\n{}\n",
            atom_line(1, 'A', 1, 1.0),
            atom_line(2, 'A', 1, 2.0),
            atom_line(1, 'L', 1, 3.0),
            atom_line(2, 'L', 1, 4.0)
        );
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        let serials: HashSet<u32> = output_serials(&outcome.records).into_iter().collect();
        assert_eq!(serials, HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn renumber_restarts_residue_numbering_per_chain() {
        let input = format!(
            "{}\n{}\n{}\n{}\n",
            atom_line(1, 'A', 40, 1.0),
            atom_line(2, 'A', 40, 2.0),
            atom_line(3, 'A', 44, 3.0),
            atom_line(4, 'B', 90, 4.0)
        );
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        let seqs: Vec<(char, i32)> = outcome
            .records
            .iter()
            .filter_map(|r| r.as_atom().map(|a| (a.chain_id, a.res_seq)))
            .collect();
        assert_eq!(seqs, vec![('A', 1), ('A', 1), ('A', 2), ('B', 1)]);
    }

    #[test]
    fn insertion_codes_distinguish_residues_during_renumber() {
        let mut with_icode = atom_line(2, 'A', 40, 2.0);
        with_icode.replace_range(26..27, "B");
        let input = format!("{}\n{}\n", atom_line(1, 'A', 40, 1.0), with_icode);

        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        let seqs: Vec<i32> = outcome
            .records
            .iter()
            .filter_map(|r| r.as_atom().map(|a| a.res_seq))
            .collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn conect_refs_are_remapped_through_new_serials() {
        let input = format!(
            "{}\n{}\nCONECT   10  300\n",
            atom_line(10, 'A', 1, 1.0),
            atom_line(300, 'A', 1, 2.0)
        );
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        let conect = outcome
            .records
            .iter()
            .find_map(|r| match r {
                Record::Conect(c) => Some(c),
                _ => None,
            })
            .expect("bond line should survive");
        assert_eq!(conect.refs, vec![1, 2]);
    }

    #[test]
    fn dangling_bond_refs_are_dropped_not_kept_stale() {
        // Atom 300 fails sanitization, so its reference must disappear.
        let input = format!(
            "{}\n{}\nCONECT   10  300\nCONECT  300\n",
            atom_line(10, 'A', 1, 1.0),
            atom_line(300, 'A', 1, 9999.999)
        );
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        let surviving: Vec<&Record> = outcome
            .records
            .iter()
            .filter(|r| matches!(r, Record::Conect(_)))
            .collect();
        assert_eq!(surviving.len(), 1);
        match surviving[0] {
            Record::Conect(c) => assert_eq!(c.refs, vec![1]),
            _ => unreachable!(),
        }
        assert_eq!(outcome.report.bonds_dropped, 1);
        assert_eq!(outcome.report.bond_refs_dropped, 2);
    }

    #[test]
    fn every_surviving_bond_ref_resolves_to_an_output_serial() {
        let input = format!(
            "{}\n{}\n{}\nCONECT    5    6    7   99\nCONECT    7    5\n",
            atom_line(5, 'A', 1, 1.0),
            atom_line(6, 'A', 1, 2.0),
            atom_line(7, 'A', 2, 3.0)
        );
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        let serials: HashSet<u32> = output_serials(&outcome.records).into_iter().collect();
        for record in &outcome.records {
            if let Record::Conect(conect) = record {
                for serial in &conect.refs {
                    assert!(serials.contains(serial), "dangling ref {serial}");
                }
            }
        }
        assert_eq!(outcome.report.bond_refs_dropped, 1);
    }

    #[test]
    fn single_pose_scenario_renumbers_to_serial_one() {
        let input = format!("MODEL 1\n{}\nENDMDL\n", atom_line(812, 'A', 33, 10.0));
        let options = CleanOptions {
            renumber: true,
            ..Default::default()
        };
        let outcome = clean(parse(&input), &options).unwrap();

        assert_eq!(output_serials(&outcome.records), vec![1]);
    }
}
