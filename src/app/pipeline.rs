//! The two export stages and the run that sequences them.
//!
//! predictions: store -> table -> coercion -> CSV
//! metrics:     JSON  -> records -> table  -> CSV (skipped if the JSON is absent)
//!
//! Stages take an explicit `ExportPaths` and never print; the caller decides
//! what to do with status lines.

use crate::coerce::coerce_prediction_columns;
use crate::config::ExportPaths;
use crate::domain::{ExportSummary, MetricsOutcome, PredictionsExport};
use crate::error::AppError;
use crate::io::{load_table, read_metrics_json, records_to_table, write_table_csv};
use crate::report;

/// Stage 1: export the predictions table.
pub fn export_predictions(paths: &ExportPaths) -> Result<PredictionsExport, AppError> {
    let mut table = load_table(&paths.db_path, &paths.predictions_table)?;
    coerce_prediction_columns(&mut table);
    write_table_csv(&paths.predictions_csv, &table)?;

    Ok(PredictionsExport {
        path: paths.predictions_csv.clone(),
        rows: table.row_count(),
    })
}

/// Stage 2: export metrics, or skip when the artifact is absent.
pub fn export_metrics(paths: &ExportPaths) -> Result<MetricsOutcome, AppError> {
    if !paths.metrics_json.exists() {
        tracing::debug!(path = %paths.metrics_json.display(), "metrics artifact missing, skipping stage");
        return Ok(MetricsOutcome::Skipped {
            path: paths.metrics_json.clone(),
        });
    }

    let records = read_metrics_json(&paths.metrics_json)?;
    let table = records_to_table(&records);
    write_table_csv(&paths.metrics_csv, &table)?;

    Ok(MetricsOutcome::Exported {
        path: paths.metrics_csv.clone(),
        rows: table.row_count(),
    })
}

/// Run both stages in order, reporting each status line as soon as its stage finishes.
///
/// A fatal error in either stage aborts the run; anything already written stays on disk.
pub fn run_export(paths: &ExportPaths, mut status: impl FnMut(&str)) -> Result<ExportSummary, AppError> {
    paths.ensure_dirs()?;

    let predictions = export_predictions(paths)?;
    status(&report::format_predictions_ok(&predictions));

    let metrics = export_metrics(paths)?;
    status(&report::format_metrics_outcome(&metrics));

    Ok(ExportSummary { predictions, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rusqlite::Connection;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_db(paths: &ExportPaths, sql: &str) {
        std::fs::create_dir_all(&paths.data_dir).unwrap();
        if paths.db_path.exists() {
            std::fs::remove_file(&paths.db_path).unwrap();
        }
        let conn = Connection::open(&paths.db_path).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    fn write_metrics(paths: &ExportPaths, json: &str) {
        std::fs::create_dir_all(&paths.artifacts_dir).unwrap();
        std::fs::write(&paths.metrics_json, json).unwrap();
    }

    fn read_csv(path: &Path) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    const FULL_TABLE: &str = "
        CREATE TABLE predictions (
            date TEXT, ticker TEXT, year INTEGER, is_train INTEGER, is_test INTEGER,
            actual REAL, prediction REAL, error_abs REAL, prob_up REAL, prob_down REAL
        );
        INSERT INTO predictions VALUES ('2024-01-02', 'AAA', 2024, 1, 0, 10.0, 10.5, 0.5, 0.7, 0.3);
        INSERT INTO predictions VALUES ('2024-01-03', 'AAA', 2024, 0, 1, 11.0, 10.0, 1.0, 0.4, 0.6);
        INSERT INTO predictions VALUES ('2024-01-04', 'BBB', 2024, 0, 1, 9.0, 9.25, 0.25, NULL, NULL);
    ";

    #[test]
    fn exports_every_row_with_header() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_db(&paths, FULL_TABLE);

        let export = export_predictions(&paths).unwrap();
        assert_eq!(export.rows, 3);

        let rows = read_csv(&paths.predictions_csv);
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            vec![
                "date", "ticker", "year", "is_train", "is_test", "actual", "prediction", "error_abs", "prob_up",
                "prob_down"
            ]
        );
        assert_eq!(
            rows[1],
            vec!["2024-01-02", "AAA", "2024", "1", "0", "10.0", "10.5", "0.5", "0.7", "0.3"]
        );
        assert_eq!(rows[3][8], "");
        assert_eq!(rows[3][9], "");
    }

    #[test]
    fn non_numeric_values_become_empty_cells() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_db(
            &paths,
            "CREATE TABLE predictions (year, actual, note);
             INSERT INTO predictions VALUES ('n/a', 'oops', 'kept');
             INSERT INTO predictions VALUES ('2022', '1.25', 'kept too');
             INSERT INTO predictions VALUES (2021.0, 3, 7);",
        );

        export_predictions(&paths).unwrap();
        let rows = read_csv(&paths.predictions_csv);
        assert_eq!(rows[1], vec!["", "", "kept"]);
        assert_eq!(rows[2], vec!["2022", "1.25", "kept too"]);
        assert_eq!(rows[3], vec!["2021", "3.0", "7"]);
    }

    #[test]
    fn table_without_optional_columns_exports() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_db(
            &paths,
            "CREATE TABLE predictions (year INTEGER, actual REAL, prediction REAL);
             INSERT INTO predictions VALUES (2020, 1.0, 2.0);",
        );

        let export = export_predictions(&paths).unwrap();
        assert_eq!(export.rows, 1);
        let rows = read_csv(&paths.predictions_csv);
        assert_eq!(rows[0], vec!["year", "actual", "prediction"]);
    }

    #[test]
    fn missing_store_aborts_without_touching_outputs() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        std::fs::create_dir_all(&paths.data_dir).unwrap();
        std::fs::write(&paths.predictions_csv, "old\n").unwrap();
        write_metrics(&paths, r#"{"rmse": 0.5}"#);

        let mut lines = Vec::new();
        let err = run_export(&paths, |l| lines.push(l.to_string())).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingInput);
        assert_eq!(err.exit_code(), 2);
        assert!(lines.is_empty());
        assert_eq!(std::fs::read_to_string(&paths.predictions_csv).unwrap(), "old\n");
        assert!(!paths.metrics_csv.exists());
        assert!(!paths.db_path.exists());
    }

    #[test]
    fn missing_table_is_fatal_query_failure() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_db(&paths, "CREATE TABLE other (x INTEGER);");

        let err = export_predictions(&paths).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QueryFailed);
        assert_eq!(err.exit_code(), 3);
        assert!(!paths.predictions_csv.exists());
    }

    #[test]
    fn single_metrics_object_is_one_row() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_metrics(&paths, r#"{"rmse": 0.5, "mae": 0.3}"#);

        let outcome = export_metrics(&paths).unwrap();
        assert_eq!(
            outcome,
            MetricsOutcome::Exported {
                path: paths.metrics_csv.clone(),
                rows: 1
            }
        );
        assert_eq!(
            std::fs::read_to_string(&paths.metrics_csv).unwrap(),
            "rmse,mae\n0.5,0.3\n"
        );
    }

    #[test]
    fn metrics_array_is_one_row_per_entry() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_metrics(&paths, r#"[{"rmse": 0.5}, {"rmse": 0.6}]"#);

        export_metrics(&paths).unwrap();
        assert_eq!(
            std::fs::read_to_string(&paths.metrics_csv).unwrap(),
            "rmse\n0.5\n0.6\n"
        );
    }

    #[test]
    fn missing_metrics_is_skipped_and_predictions_still_export() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_db(&paths, FULL_TABLE);

        let mut lines = Vec::new();
        let summary = run_export(&paths, |l| lines.push(l.to_string())).unwrap();

        assert_eq!(summary.predictions.rows, 3);
        assert_eq!(
            summary.metrics,
            MetricsOutcome::Skipped {
                path: paths.metrics_json.clone()
            }
        );
        assert!(paths.predictions_csv.exists());
        assert!(!paths.metrics_csv.exists());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("OK -> "));
        assert!(lines[0].ends_with("(3 rows)"));
        assert!(lines[1].starts_with("WARNING: "));
    }

    #[test]
    fn malformed_metrics_is_fatal_after_predictions() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        write_db(&paths, FULL_TABLE);
        write_metrics(&paths, "not json");

        let mut lines = Vec::new();
        let err = run_export(&paths, |l| lines.push(l.to_string())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(lines.len(), 1);
        assert!(paths.predictions_csv.exists());
        assert!(!paths.metrics_csv.exists());
    }

    #[test]
    fn second_run_replaces_prior_output() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());

        write_db(&paths, FULL_TABLE);
        write_metrics(&paths, r#"[{"rmse": 0.5}, {"rmse": 0.6}, {"rmse": 0.7}]"#);
        run_export(&paths, |_| {}).unwrap();
        assert_eq!(read_csv(&paths.predictions_csv).len(), 4);
        assert_eq!(read_csv(&paths.metrics_csv).len(), 4);

        write_db(
            &paths,
            "CREATE TABLE predictions (ticker TEXT, actual REAL);
             INSERT INTO predictions VALUES ('ZZZ', 1.5);",
        );
        write_metrics(&paths, r#"{"auc": 0.9}"#);
        let summary = run_export(&paths, |_| {}).unwrap();

        assert_eq!(summary.predictions.rows, 1);
        assert_eq!(
            std::fs::read_to_string(&paths.predictions_csv).unwrap(),
            "ticker,actual\nZZZ,1.5\n"
        );
        assert_eq!(std::fs::read_to_string(&paths.metrics_csv).unwrap(), "auc\n0.9\n");
    }

    #[test]
    fn run_creates_output_directories() {
        let dir = TempDir::new().unwrap();
        let paths = ExportPaths::from_root(dir.path());
        let _ = run_export(&paths, |_| {});
        assert!(paths.data_dir.is_dir());
        assert!(paths.artifacts_dir.is_dir());
    }
}
