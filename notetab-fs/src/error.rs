//! Typed error types for notetab-fs.
//!
//! A dismissed dialog is reported as `Ok(None)` by the gateway, never as an
//! error.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while picking, reading or writing a file.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The source file could not be read (missing, permissions, invalid UTF-8).
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination file could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Relative paths are refused so a write never lands in an unexpected cwd.
    #[error("Path must be absolute: '{}'", .0.display())]
    NotAbsolute(PathBuf),

    /// The path prompt itself failed (e.g. stdin closed).
    #[error("Path prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// The blocking I/O task panicked or was cancelled by the runtime.
    #[error("Internal error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for GatewayError {
    fn from(e: tokio::task::JoinError) -> Self {
        GatewayError::Task(e.to_string())
    }
}
