//! Multi-pose stream splitting.
//!
//! Docking engines write every candidate pose of one run into a single file as
//! `MODEL`/`ENDMDL` blocks. Downstream tools want one self-contained file per
//! pose, so the splitter extracts each block, prefixes the shared header that
//! preceded the first `MODEL`, and guarantees a terminator even when the
//! engine was interrupted mid-write.

use crate::model::record::Record;

/// One extracted pose, numbered 1..N in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    /// Sequential pose number, fixed at split time.
    pub number: usize,
    /// Header records, the pose body, and exactly one ENDMDL terminator.
    pub records: Vec<Record>,
}

/// Splits a record stream into self-contained poses.
///
/// Lines before the first `MODEL` are captured once as a shared header and
/// prefixed onto every pose. Each non-empty `MODEL`..`ENDMDL` body is flushed
/// with exactly one `ENDMDL` terminator, synthesized when the stream lacked
/// it (an engine killed mid-run must not silently lose its last pose). Stray
/// content between an `ENDMDL` and the next `MODEL` is discarded; docking
/// tools do not emit meaningful content there.
///
/// A stream with no model markers at all is a single implicit pose: it is
/// passed through unchanged as pose 1, provided it contains at least one
/// atom-shaped record. An empty or header-only stream yields no poses, and
/// the caller decides whether that is an error.
pub fn split_poses(records: Vec<Record>) -> Vec<Pose> {
    let mut poses: Vec<Pose> = Vec::new();
    let mut header: Vec<Record> = Vec::new();
    let mut body: Vec<Record> = Vec::new();
    let mut in_model = false;
    let mut saw_model = false;

    let flush = |body: &mut Vec<Record>, poses: &mut Vec<Pose>, header: &[Record]| {
        if body.is_empty() {
            return;
        }
        let mut records = Vec::with_capacity(header.len() + body.len() + 1);
        records.extend_from_slice(header);
        records.append(body);
        records.push(Record::model_end());
        poses.push(Pose {
            number: poses.len() + 1,
            records,
        });
    };

    for record in records {
        match record {
            Record::ModelStart(_) => {
                // A MODEL while still inside a model means the previous block
                // was never terminated; flush it rather than dropping it.
                if in_model {
                    flush(&mut body, &mut poses, &header);
                }
                in_model = true;
                saw_model = true;
            }
            Record::ModelEnd(_) => {
                if in_model {
                    flush(&mut body, &mut poses, &header);
                }
                in_model = false;
            }
            other => {
                if !saw_model {
                    header.push(other);
                } else if in_model {
                    body.push(other);
                }
            }
        }
    }

    // Unterminated final model at end-of-input.
    if in_model {
        flush(&mut body, &mut poses, &header);
    }

    if !saw_model {
        if header.iter().any(Record::is_atom_like) {
            return vec![Pose {
                number: 1,
                records: header,
            }];
        }
        return Vec::new();
    }

    poses
}
