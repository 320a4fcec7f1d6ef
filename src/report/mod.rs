//! Human-readable status lines printed after each stage.

use std::path::Path;

use crate::domain::{ExportSummary, MetricsOutcome, PredictionsExport};

pub fn format_predictions_ok(export: &PredictionsExport) -> String {
    format!("OK -> {} ({} rows)", export.path.display(), export.rows)
}

pub fn format_metrics_ok(path: &Path) -> String {
    format!("OK -> {}", path.display())
}

pub fn format_metrics_skipped(path: &Path) -> String {
    format!("WARNING: {} not found, metrics not exported.", path.display())
}

pub fn format_metrics_outcome(outcome: &MetricsOutcome) -> String {
    match outcome {
        MetricsOutcome::Exported { path, .. } => format_metrics_ok(path),
        MetricsOutcome::Skipped { path } => format_metrics_skipped(path),
    }
}

/// One line per stage, in run order.
pub fn format_summary(summary: &ExportSummary) -> String {
    format!(
        "{}\n{}",
        format_predictions_ok(&summary.predictions),
        format_metrics_outcome(&summary.metrics)
    )
}
