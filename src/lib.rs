//! `bi-export` library crate.
//!
//! The binary (`bi-export`) is a thin wrapper around this library so that:
//!
//! - each export stage is testable against temporary directories
//! - the table model and coercion rules are reusable on their own

pub mod app;
pub mod cli;
pub mod coerce;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
