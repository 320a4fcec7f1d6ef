//! Column-name-driven numeric coercion for the predictions table.
//!
//! Coercion is best effort: a value that cannot be read as the target type
//! becomes `CellValue::Null`. Rows are never dropped and unknown columns are
//! left exactly as stored.

use crate::domain::{CellValue, ColumnKind, INTEGER_COLUMNS, REAL_COLUMNS, Table};

/// Coerce every allow-listed column present in `table`, in place.
///
/// Integer columns are processed first, then real columns. Columns named in
/// the allow-lists but absent from the table are skipped.
pub fn coerce_prediction_columns(table: &mut Table) {
    for name in INTEGER_COLUMNS {
        coerce_column(table, name, ColumnKind::Integer);
    }
    for name in REAL_COLUMNS {
        coerce_column(table, name, ColumnKind::Real);
    }
}

/// Coerce a single named column; returns how many non-null cells became null.
pub fn coerce_column(table: &mut Table, name: &str, kind: ColumnKind) -> usize {
    let Some(idx) = table.column_index(name) else {
        tracing::debug!(column = name, "column absent, skipping coercion");
        return 0;
    };

    let mut nulled = 0usize;
    for row in &mut table.rows {
        let cell = std::mem::replace(&mut row[idx], CellValue::Null);
        let was_null = cell.is_null();
        let coerced = match kind {
            ColumnKind::Integer => to_integer(cell),
            ColumnKind::Real => to_real(cell),
            ColumnKind::Passthrough => cell,
        };
        if !was_null && coerced.is_null() {
            nulled += 1;
        }
        row[idx] = coerced;
    }

    if nulled > 0 {
        tracing::debug!(column = name, nulled, "unparseable values coerced to null");
    }
    nulled
}

/// Best-effort conversion to a nullable integer.
///
/// Reals convert only when integral and within `i64` range; anything with a
/// fractional part has no lossless integer form and becomes null.
pub fn to_integer(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Integer(v) => CellValue::Integer(v),
        CellValue::Real(v) => real_to_integer(v),
        CellValue::Text(s) => match parse_number(&s) {
            Some(Number::Integer(v)) => CellValue::Integer(v),
            Some(Number::Real(v)) => real_to_integer(v),
            None => CellValue::Null,
        },
        CellValue::Null | CellValue::Blob(_) => CellValue::Null,
    }
}

/// Best-effort conversion to a nullable real.
pub fn to_real(cell: CellValue) -> CellValue {
    let value = match cell {
        CellValue::Integer(v) => v as f64,
        CellValue::Real(v) => v,
        CellValue::Text(s) => match parse_number(&s) {
            Some(Number::Integer(v)) => v as f64,
            Some(Number::Real(v)) => v,
            None => return CellValue::Null,
        },
        CellValue::Null | CellValue::Blob(_) => return CellValue::Null,
    };
    if value.is_nan() {
        CellValue::Null
    } else {
        CellValue::Real(value)
    }
}

fn real_to_integer(v: f64) -> CellValue {
    // i64::MAX is not exactly representable; 2^63 is the first value out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if v.is_finite() && v.fract() == 0.0 && v >= -LIMIT && v < LIMIT {
        CellValue::Integer(v as i64)
    } else {
        CellValue::Null
    }
}

enum Number {
    Integer(i64),
    Real(f64),
}

fn parse_number(raw: &str) -> Option<Number> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<i64>() {
        return Some(Number::Integer(v));
    }
    s.parse::<f64>().ok().map(Number::Real)
}
