//! Read-only access to the predictions store (a SQLite file).

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::domain::{CellValue, Table};
use crate::error::{AppError, ErrorKind};

/// An open, read-only handle on the store.
///
/// Call `close` when done; dropping also releases the connection, but
/// `close` reports the outcome.
pub struct PredictionStore {
    conn: Connection,
    path: PathBuf,
}

impl PredictionStore {
    /// Open an existing store.
    ///
    /// Fails with a missing-input error, without touching SQLite, when the
    /// file does not exist.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::missing_input(path));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            AppError::new(
                ErrorKind::QueryFailed,
                format!("Failed to open store {}: {e}", path.display()),
            )
        })?;

        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Read every row of `table`, preserving column names and row order.
    pub fn read_table(&self, table: &str) -> Result<Table, AppError> {
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        let fail = |e: rusqlite::Error| AppError::query_failed(&self.path, table, e);

        let mut stmt = self.conn.prepare(&sql).map_err(fail)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
        let width = columns.len();

        let mut out = Table::new(columns);
        let mut rows = stmt.query([]).map_err(fail)?;
        while let Some(row) = rows.next().map_err(fail)? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                let value = row.get_ref(idx).map_err(fail)?;
                cells.push(cell_from_sql(value));
            }
            out.rows.push(cells);
        }

        tracing::debug!(table, rows = out.row_count(), "read table");
        Ok(out)
    }

    /// Release the connection.
    pub fn close(self) -> Result<(), AppError> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, e)| {
                AppError::new(
                    ErrorKind::QueryFailed,
                    format!("Failed to close store {}: {e}", path.display()),
                )
            })
    }
}

fn cell_from_sql(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(v) => CellValue::Integer(v),
        ValueRef::Real(v) => CellValue::Real(v),
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => CellValue::Blob(bytes.to_vec()),
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Open `path`, read `table`, and close the connection on every path.
pub fn load_table(path: &Path, table: &str) -> Result<Table, AppError> {
    let store = PredictionStore::open(path)?;
    let result = store.read_table(table);
    match (result, store.close()) {
        (Ok(table), Ok(())) => Ok(table),
        // A read failure outranks a close failure; the connection is gone either way.
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(e),
    }
}
