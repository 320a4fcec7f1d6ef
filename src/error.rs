//! Application error type.
//!
//! Every fatal condition carries the process exit code it maps to, so
//! `main` stays a one-liner.

use std::path::Path;

/// Broad failure class, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input file does not exist.
    MissingInput,
    /// The store could not be opened or the table could not be read.
    QueryFailed,
    /// An input exists but its contents are unusable (e.g. malformed JSON).
    InvalidInput,
    /// Creating directories or writing an output file failed.
    Output,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::MissingInput | ErrorKind::InvalidInput => 2,
            ErrorKind::QueryFailed => 3,
            ErrorKind::Output => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            exit_code: kind.exit_code(),
            kind,
            message: message.into(),
        }
    }

    pub fn missing_input(path: &Path) -> Self {
        Self::new(
            ErrorKind::MissingInput,
            format!("Required input not found: {}", path.display()),
        )
    }

    pub fn query_failed(path: &Path, table: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::QueryFailed,
            format!("Failed to read table '{table}' from {}: {cause}", path.display()),
        )
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
