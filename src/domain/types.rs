//! Shared domain types.
//!
//! These types are deliberately schema-free: the prediction table's columns
//! are whatever the store returns, and metrics keys are whatever the JSON
//! artifact contains.

use std::borrow::Cow;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

/// One cell, tagged with the SQLite storage class it came from (or was
/// coerced to).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render the cell as a CSV field.
    ///
    /// Null renders as an empty field. Integral reals keep a trailing `.0` so
    /// real-typed columns stay visibly real in the BI tool.
    pub fn to_field(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Integer(v) => Cow::Owned(v.to_string()),
            CellValue::Real(v) => Cow::Owned(format_real(*v)),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Blob(b) => String::from_utf8_lossy(b),
        }
    }
}

fn format_real(v: f64) -> String {
    if v.is_nan() {
        return String::new();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    // `Display` for f64 is shortest round-trip but drops the fraction on
    // integral values and never switches to exponent notation.
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// An in-memory table: ordered column names plus rows aligned to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Target type of a prediction column after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Real,
    Passthrough,
}

/// Columns coerced to nullable integers.
pub const INTEGER_COLUMNS: [&str; 3] = ["year", "is_train", "is_test"];

/// Columns coerced to nullable reals.
pub const REAL_COLUMNS: [&str; 5] = ["actual", "prediction", "error_abs", "prob_up", "prob_down"];

/// The metrics artifact as written by the training process.
///
/// Either shape is accepted; `into_records` collapses both into a batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MetricsDocument {
    Single(Map<String, Value>),
    Batch(Vec<Map<String, Value>>),
}

impl MetricsDocument {
    pub fn into_records(self) -> Vec<Map<String, Value>> {
        match self {
            MetricsDocument::Single(record) => vec![record],
            MetricsDocument::Batch(records) => records,
        }
    }
}

/// Result of the predictions stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionsExport {
    pub path: PathBuf,
    pub rows: usize,
}

/// Result of the metrics stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsOutcome {
    Exported { path: PathBuf, rows: usize },
    /// The metrics artifact was absent; nothing was written.
    Skipped { path: PathBuf },
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub predictions: PredictionsExport,
    pub metrics: MetricsOutcome,
}
