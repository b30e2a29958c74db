//! Read/write projection JSON files.
//!
//! Projection JSON is the portable form of a run: the input parameters, the
//! derived terms, every monthly row, every equity series, and the totals. The
//! `plot` subcommand re-reads it to redraw charts without recomputing.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::MortgageProjection;
use crate::error::MortgageError;

/// Write a projection JSON file.
pub fn write_projection_json(path: &Path, projection: &MortgageProjection) -> Result<(), MortgageError> {
    let file = File::create(path).map_err(|e| MortgageError::output_write(path, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, projection).map_err(|e| MortgageError::output_write(path, e))?;
    out.flush().map_err(|e| MortgageError::output_write(path, e))?;

    log::info!("wrote projection JSON to {}", path.display());
    Ok(())
}

/// Read a projection JSON file.
pub fn read_projection_json(path: &Path) -> Result<MortgageProjection, MortgageError> {
    let file = File::open(path).map_err(|e| MortgageError::invalid_input(path, e))?;
    let projection: MortgageProjection =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| MortgageError::invalid_input(path, e))?;

    if projection.rows.is_empty() {
        return Err(MortgageError::invalid_input(path, "projection has no schedule rows"));
    }
    Ok(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoanParameters;
    use crate::engine::compute;

    #[test]
    fn projection_survives_a_json_round_trip() {
        let projection = compute(&LoanParameters {
            term_years: 5,
            ..LoanParameters::default()
        })
        .unwrap();
        let path = std::env::temp_dir().join(format!("mortgage-equity-{}-projection.json", std::process::id()));

        write_projection_json(&path, &projection).unwrap();
        let back = read_projection_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(back.rows.len(), 60);
        assert_eq!(back.equity.len(), projection.equity.len());
        assert_eq!(back.terms.num_months, 60);
        assert!((back.totals.interest - projection.totals.interest).abs() < 1e-6);
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let err = read_projection_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidInput { .. }));
    }
}
