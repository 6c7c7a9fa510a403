use std::io::Write;

use casm::{CasmError, StructureComparison};

pub mod angular;
pub mod global;
pub mod local;

/// Load two distance matrix files and set up the comparison.
pub fn load_comparison(ref_file: &str, alt_file: &str) -> anyhow::Result<StructureComparison> {
    let reference = casm::read_distance_csv(ref_file)?;
    let other = casm::read_distance_csv(alt_file)?;
    StructureComparison::new(
        &reference.struc_id,
        reference.residues,
        reference.matrix,
        &other.struc_id,
        other.residues,
        other.matrix,
    )
}

/// Parse a comma-separated threshold list, e.g. `1.0,2.0,4.0,8.0`.
pub fn parse_thresholds(opt: &str) -> anyhow::Result<Vec<f64>> {
    opt.split(',')
        .map(|s| {
            s.trim().parse::<f64>().map_err(|_| {
                CasmError::InvalidThresholdSequence(format!("not a number: {}", s)).into()
            })
        })
        .collect()
}

/// Write the per-region score table with its trailing aggregate row.
pub fn write_score_table(
    writer: &mut dyn Write,
    labels: &[String],
    rows: &[(f64, f64)],
) -> anyhow::Result<()> {
    writeln!(writer, "#region\tsize\tpercent")?;
    for (label, (size, percent)) in labels.iter().zip(rows) {
        writeln!(writer, "{}\t{}\t{:.4}", label, size, percent)?;
    }
    if let Some((size, percent)) = rows.last() {
        if rows.len() > labels.len() {
            writeln!(writer, "avg\t{:.1}\t{:.4}", size, percent)?;
        }
    }
    Ok(())
}
