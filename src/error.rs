//! Error types for volfill operations.
//!
//! Only conditions that stop a run (or a single file) are errors. Recoverable
//! conditions that the run absorbs are reported as [`crate::warning::RunWarning`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while planning, fetching, or writing placeholder files
#[derive(Debug, Error)]
pub enum FillError {
    /// A file spec entry was malformed (empty path, unsafe path, bad size)
    #[error("Invalid file spec: {0}")]
    InvalidSpec(String),

    /// No valid file specs remain after validation
    #[error("No valid file specs remain after validation")]
    EmptyInput,

    /// A single text source could not be fetched
    #[error("Failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// Parent directory of a file could not be created
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be opened, written, or sized
    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Written file length does not match the planned size
    #[error("Length mismatch for {}: expected {expected} bytes, found {actual}", path.display())]
    LengthMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Destination root cannot be created or resolved
    #[error("Destination {} cannot be used: {reason}", path.display())]
    DestinationUnresolvable { path: PathBuf, reason: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Async runtime or worker failure
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for FillError {
    fn from(err: config::ConfigError) -> Self {
        FillError::ConfigError(err.to_string())
    }
}
