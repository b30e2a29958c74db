//! Export the monthly schedule to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one line per month, then one equity column per scenario.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::MortgageProjection;
use crate::error::MortgageError;

/// Write the schedule to a CSV file.
pub fn write_schedule_csv(path: &Path, projection: &MortgageProjection) -> Result<(), MortgageError> {
    let file = File::create(path).map_err(|e| MortgageError::output_write(path, e))?;
    let mut out = BufWriter::new(file);
    write_schedule(&mut out, projection).map_err(|e| MortgageError::output_write(path, e))?;
    out.flush().map_err(|e| MortgageError::output_write(path, e))?;

    log::info!("wrote {} schedule rows to {}", projection.rows.len(), path.display());
    Ok(())
}

fn write_schedule(out: &mut impl Write, projection: &MortgageProjection) -> std::io::Result<()> {
    // Header
    write!(out, "month,year,principal,interest,remaining_balance,property_tax,insurance")?;
    for series in &projection.equity {
        write!(out, ",equity_{}", csv_field(&series.scenario.name))?;
    }
    writeln!(out)?;

    for (idx, row) in projection.rows.iter().enumerate() {
        write!(
            out,
            "{},{:.4},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.month,
            row.year(),
            row.principal_paid,
            row.interest_paid,
            row.remaining_balance,
            row.property_tax,
            row.insurance,
        )?;
        for series in &projection.equity {
            match series.points.get(idx) {
                Some(p) => write!(out, ",{:.2}", p.equity)?,
                None => write!(out, ",")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Scenario names are user supplied; keep them from breaking the column layout.
fn csv_field(name: &str) -> String {
    name.chars()
        .map(|c| if c == ',' || c == '"' || c.is_whitespace() { '_' } else { c })
        .collect()
}
