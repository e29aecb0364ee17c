//! Error types for scoring input and configuration handling.
//!
//! The calculator itself cannot fail for well-typed input; errors here
//! cover the surfaces around it: reading entity batches, parsing them,
//! and loading configuration. Commands convert these into `anyhow`
//! errors at the boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// File system I/O failures, with the offending path.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Entity batch files that are not valid JSON for the expected shape.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Configuration file problems surfaced from an explicit --config path.
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Batch-level validation failures.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl ScoreError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
