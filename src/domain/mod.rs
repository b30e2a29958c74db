//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loan inputs (`LoanParameters`, `AppreciationScenario`)
//! - engine outputs (`AmortizationRow`, `EquitySeries`, `SummaryTotals`, `MortgageProjection`)
//! - run configuration for the presentation layer (`RunConfig`)

pub mod types;

pub use types::*;
