//! Input/output helpers.
//!
//! - SQLite table reads (`store`)
//! - metrics JSON read + shape normalization (`metrics`)
//! - CSV table writes (`export`)

pub mod export;
pub mod metrics;
pub mod store;

pub use export::*;
pub use metrics::*;
pub use store::*;
