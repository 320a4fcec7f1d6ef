//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up diagnostic logging
//! - resolves the project layout
//! - runs both export stages, printing a status line after each

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{ExportPaths, resolve_root};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bi-export` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging();

    let root = resolve_root(cli.root.as_deref())?;
    let paths = ExportPaths::from_root(&root);
    tracing::debug!(root = %root.display(), "resolved project root");

    pipeline::run_export(&paths, |line| println!("{line}"))?;
    Ok(())
}

/// Diagnostics go to stderr so stdout carries only status lines.
///
/// Quiet by default; `RUST_LOG=bi_export=debug` shows per-stage detail.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
