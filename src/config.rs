//! Run configuration: where inputs are read from and outputs written to.
//!
//! Every path hangs off a single project root:
//!
//! ```text
//! <root>/data/preds.db                 (required input)
//! <root>/data/predictions.csv          (output)
//! <root>/artifacts/metrics.json        (optional input)
//! <root>/artifacts/metrics_for_bi.csv  (output)
//! ```

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable consulted when `--root` is not given.
pub const ROOT_ENV_VAR: &str = "BI_EXPORT_ROOT";

/// Table read from the store.
pub const PREDICTIONS_TABLE: &str = "predictions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub data_dir: PathBuf,
    pub artifacts_dir: PathBuf,
    pub db_path: PathBuf,
    pub predictions_table: String,
    pub predictions_csv: PathBuf,
    pub metrics_json: PathBuf,
    pub metrics_csv: PathBuf,
}

impl ExportPaths {
    pub fn from_root(root: &Path) -> Self {
        let data_dir = root.join("data");
        let artifacts_dir = root.join("artifacts");
        Self {
            db_path: data_dir.join("preds.db"),
            predictions_table: PREDICTIONS_TABLE.to_string(),
            predictions_csv: data_dir.join("predictions.csv"),
            metrics_json: artifacts_dir.join("metrics.json"),
            metrics_csv: artifacts_dir.join("metrics_for_bi.csv"),
            data_dir,
            artifacts_dir,
        }
    }

    /// Create the output directories if they are missing.
    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.data_dir, &self.artifacts_dir] {
            std::fs::create_dir_all(dir)
                .map_err(|e| AppError::output(format!("Failed to create directory '{}': {e}", dir.display())))?;
        }
        Ok(())
    }
}

/// Resolve the project root: explicit flag, then `BI_EXPORT_ROOT` (a `.env`
/// file is honored), then the current directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    dotenvy::dotenv().ok();
    if let Some(root) = std::env::var_os(ROOT_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }

    std::env::current_dir()
        .map_err(|e| AppError::invalid_input(format!("Failed to determine current directory: {e}")))
}
