use std::collections::HashSet;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use nalgebra::Vector3;
use prettytable::{Table, format, row};

use dock_forge::{Record, RecordType};

use crate::commands::run_with_spinner;

/// Report-only command that inspects a record stream.
#[derive(Debug, Default, Args)]
pub struct InfoArgs {
    /// Padding added around the structure's extent when reporting the
    /// blind-docking box, in ångströms.
    #[arg(long, default_value_t = 5.0, value_name = "ANGSTROM")]
    pub box_padding: f64,
}

/// Computes and prints stream statistics without modifying the records.
pub fn run(records: &[Record], args: &InfoArgs) -> Result<()> {
    let (chain_reports, stream_report, docking_box) =
        run_with_spinner("Analyzing structure", || {
            let chains = collect_chain_reports(records);
            let stream = collect_stream_report(records);
            let docking_box = calculate_docking_box(records, args.box_padding);
            Ok((chains, stream, docking_box))
        })?;

    print_tables(&chain_reports, &stream_report, docking_box.as_ref())?;
    Ok(())
}

fn collect_chain_reports(records: &[Record]) -> Vec<ChainReport> {
    let mut order: Vec<char> = Vec::new();
    let mut reports: Vec<ChainReport> = Vec::new();

    for atom in records.iter().filter_map(Record::as_atom) {
        let idx = match order.iter().position(|&c| c == atom.chain_id) {
            Some(idx) => idx,
            None => {
                order.push(atom.chain_id);
                reports.push(ChainReport {
                    id: atom.chain_id,
                    residues: HashSet::new(),
                    atoms: 0,
                    hetatms: 0,
                });
                order.len() - 1
            }
        };

        let report = &mut reports[idx];
        report.residues.insert((atom.res_seq, atom.i_code));
        match atom.record_type {
            RecordType::Atom => report.atoms += 1,
            RecordType::Hetatm => report.hetatms += 1,
        }
    }

    reports
}

fn collect_stream_report(records: &[Record]) -> StreamReport {
    let mut report = StreamReport::default();
    for record in records {
        match record {
            Record::Atom(_) => report.atoms += 1,
            Record::Conect(_) => report.bonds += 1,
            Record::ModelStart(_) => report.models += 1,
            Record::ModelEnd(_) => {}
            Record::Other(_) => report.other += 1,
            Record::Malformed(_) => report.malformed += 1,
        }
    }
    report
}

/// Bounding box of every atom coordinate: center at the midpoint of the
/// extent, size padded on both sides. The shape a blind-docking search box
/// would use for this structure.
fn calculate_docking_box(records: &[Record], padding: f64) -> Option<DockingBox> {
    let mut min = Vector3::repeat(f64::INFINITY);
    let mut max = Vector3::repeat(f64::NEG_INFINITY);
    let mut seen = false;

    for atom in records.iter().filter_map(Record::as_atom) {
        if !atom.has_finite_coords() {
            continue;
        }
        seen = true;
        let pos = Vector3::new(atom.pos.x, atom.pos.y, atom.pos.z);
        min = min.inf(&pos);
        max = max.sup(&pos);
    }

    if !seen {
        return None;
    }

    Some(DockingBox {
        center: (min + max) / 2.0,
        size: (max - min) + Vector3::repeat(2.0 * padding),
    })
}

fn print_tables(
    chains: &[ChainReport],
    stream: &StreamReport,
    docking_box: Option<&DockingBox>,
) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "DockForge Structure Report")?;
    writeln!(&mut stderr)?;

    let mut chain_table = Table::new();
    print_boxed_label(&mut stderr, "Chain Breakdown")?;
    chain_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    chain_table.set_titles(row!["Chain", "Residues", "ATOM", "HETATM"]);
    for chain in chains {
        chain_table.add_row(row![
            display_chain(chain.id),
            chain.residues.len(),
            chain.atoms,
            chain.hetatms
        ]);
    }
    chain_table
        .print(&mut stderr)
        .context("Failed to render chain breakdown")?;
    writeln!(&mut stderr)?;

    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Stream Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Atom records", stream.atoms]);
    summary_table.add_row(row!["Bond records", stream.bonds]);
    summary_table.add_row(row!["Models", stream.models]);
    summary_table.add_row(row!["Other lines", stream.other]);
    summary_table.add_row(row!["Malformed atom lines", stream.malformed]);

    if let Some(docking_box) = docking_box {
        summary_table.add_row(row![
            "Box Center (Å)",
            format!(
                "x = {:.2}, y = {:.2}, z = {:.2}",
                docking_box.center.x, docking_box.center.y, docking_box.center.z
            )
        ]);
        summary_table.add_row(row![
            "Box Size (Å)",
            format!(
                "x = {:.2}, y = {:.2}, z = {:.2}",
                docking_box.size.x, docking_box.size.y, docking_box.size.z
            )
        ]);
    } else {
        summary_table.add_row(row!["Box", "No coordinates"]);
    }

    summary_table
        .print(&mut stderr)
        .context("Failed to render stream summary")?;

    Ok(())
}

fn display_chain(chain: char) -> String {
    if chain == ' ' {
        "(blank)".to_string()
    } else {
        chain.to_string()
    }
}

fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}

#[derive(Debug)]
struct ChainReport {
    id: char,
    residues: HashSet<(i32, Option<char>)>,
    atoms: usize,
    hetatms: usize,
}

#[derive(Debug, Default)]
struct StreamReport {
    atoms: usize,
    bonds: usize,
    models: usize,
    other: usize,
    malformed: usize,
}

#[derive(Debug)]
struct DockingBox {
    center: Vector3<f64>,
    size: Vector3<f64>,
}
