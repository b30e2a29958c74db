//! Reporting: formatted terminal output and the summary document.

pub mod document;
pub mod format;

pub use document::write_report;
pub use format::{format_annual_table, format_run_summary};
