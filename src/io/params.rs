//! Load `LoanParameters` from a JSON file.
//!
//! Every field is optional; missing ones take the built-in defaults. The file
//! is only parsed here, validation stays with the engine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::LoanParameters;
use crate::error::MortgageError;

pub fn read_params_json(path: &Path) -> Result<LoanParameters, MortgageError> {
    let file = File::open(path).map_err(|e| MortgageError::invalid_input(path, e))?;
    let params: LoanParameters =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| MortgageError::invalid_input(path, e))?;
    log::debug!("loaded parameters from {}: {params:?}", path.display());
    Ok(params)
}
