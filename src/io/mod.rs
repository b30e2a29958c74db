//! Input/output helpers.
//!
//! - loan parameters from JSON (`params`)
//! - schedule export to CSV (`export`)
//! - projection JSON read/write (`projection`)

pub mod export;
pub mod params;
pub mod projection;

pub use export::*;
pub use params::*;
pub use projection::*;
