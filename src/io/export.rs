//! Write tables to CSV for the BI tool.
//!
//! Output is UTF-8, header first, no index column. An existing file at the
//! target path is truncated and replaced.

use std::fs::File;
use std::path::Path;

use crate::domain::{CellValue, Table};
use crate::error::AppError;

/// Write `table` to `path` as CSV.
///
/// A table without columns produces an empty file.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    if !table.columns.is_empty() {
        writer
            .write_record(&table.columns)
            .map_err(|e| AppError::output(format!("Failed to write CSV header to '{}': {e}", path.display())))?;

        for row in &table.rows {
            let fields: Vec<_> = row.iter().map(CellValue::to_field).collect();
            writer
                .write_record(fields.iter().map(|f| f.as_bytes()))
                .map_err(|e| AppError::output(format!("Failed to write CSV row to '{}': {e}", path.display())))?;
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush CSV '{}': {e}", path.display())))?;

    tracing::debug!(path = %path.display(), rows = table.row_count(), "wrote csv");
    Ok(())
}
