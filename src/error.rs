//! Error types.
//!
//! - `MortgageError` is the library error: parameter validation, unreadable
//!   input files, and failed output writes.
//! - `AppError` is what the binary reports: a message plus a process exit code.

use std::path::Path;

use thiserror::Error;

/// Exit code for invalid parameters or unreadable input files.
pub const EXIT_INVALID_INPUT: u8 = 2;
/// Exit code for failures writing an output artifact.
pub const EXIT_OUTPUT_WRITE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MortgageError {
    /// A `LoanParameters` precondition was violated. Raised before any computation.
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// A params or projection file could not be read or parsed.
    #[error("Invalid input '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    /// An output artifact (chart, report, export) could not be written.
    #[error("Failed to write '{path}': {reason}")]
    OutputWrite { path: String, reason: String },
}

impl MortgageError {
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_input(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::InvalidInput {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn output_write(path: &Path, reason: impl std::fmt::Display) -> Self {
        Self::OutputWrite {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            MortgageError::InvalidParameter { .. } | MortgageError::InvalidInput { .. } => EXIT_INVALID_INPUT,
            MortgageError::OutputWrite { .. } => EXIT_OUTPUT_WRITE,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<MortgageError> for AppError {
    fn from(err: MortgageError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_message_names_field() {
        let err = MortgageError::invalid_parameter("home_price", "must be > 0 (got -1)");
        assert_eq!(err.to_string(), "Invalid parameter `home_price`: must be > 0 (got -1)");
        assert_eq!(err.exit_code(), EXIT_INVALID_INPUT);
    }

    #[test]
    fn app_error_keeps_exit_code_from_output_write() {
        let err = MortgageError::output_write(Path::new("/nope/chart.png"), "permission denied");
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), EXIT_OUTPUT_WRITE);
        assert!(app.to_string().contains("/nope/chart.png"));
    }
}
