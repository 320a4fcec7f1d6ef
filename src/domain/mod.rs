//! Domain types used throughout the export pipeline.
//!
//! This module defines:
//!
//! - the schema-free table model (`Table`, `CellValue`)
//! - column coercion targets (`ColumnKind` and its allow-lists)
//! - the metrics artifact shape (`MetricsDocument`)
//! - per-stage run outcomes (`ExportSummary`)

pub mod types;

pub use types::*;
