//! Command-line parsing for the BI exporter.
//!
//! With no arguments the exporter runs against the current directory, so the
//! usual invocation is a bare `bi-export` from the project root.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "bi-export",
    version,
    about = "Export predictions and model metrics to CSV for BI tools"
)]
pub struct Cli {
    /// Project root containing `data/` and `artifacts/`.
    ///
    /// Defaults to `BI_EXPORT_ROOT` (also read from `.env`), then the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}
