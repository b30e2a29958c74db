//! `mortgage-equity` library crate.
//!
//! The binary (`mortgage`) is a thin wrapper around this library so that:
//!
//! - the amortization engine is testable without spawning processes
//! - the engine can be reused without the chart/report layer
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
