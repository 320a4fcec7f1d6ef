//! Read the metrics JSON artifact and flatten it into a table.
//!
//! Accepted shapes:
//! - a single object: one row
//! - an array of objects: one row per element
//!
//! Columns are the union of keys across rows, in first-seen order. Nested
//! values are not flattened; they land in the cell as compact JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::{CellValue, MetricsDocument, Table};
use crate::error::AppError;

/// Parse the metrics file at `path` into normalized records.
pub fn read_metrics_json(path: &Path) -> Result<Vec<Map<String, Value>>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::invalid_input(format!("Failed to open metrics JSON '{}': {e}", path.display())))?;
    let doc: MetricsDocument = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::invalid_input(format!(
            "Invalid metrics JSON '{}' (expected an object or an array of objects): {e}",
            path.display()
        ))
    })?;
    Ok(doc.into_records())
}

/// Build a table from metric records, unioning their keys.
pub fn records_to_table(records: &[Map<String, Value>]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    let mut table = Table::new(columns);
    for record in records {
        let row = table
            .columns
            .iter()
            .map(|col| record.get(col).map_or(CellValue::Null, json_cell))
            .collect();
        table.rows.push(row);
    }
    table
}

fn json_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::String(s) => CellValue::Text(s.clone()),
        // Keep the number's JSON text so `0.5` stays `0.5` and `3` stays `3`.
        Value::Number(n) => CellValue::Text(n.to_string()),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}
