// error.rs — Error types for the decision trail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the trail.
#[derive(Debug, Error)]
pub enum TrailError {
    /// Failed to open or create the trail file.
    #[error("failed to open decision trail at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an event to the trail.
    #[error("failed to append event: {0}")]
    WriteFailed(#[from] std::io::Error),

    /// An event line is not valid JSON, or an event failed to serialize.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The trail's hash chain is broken at some line — the file has been
    /// edited, truncated, or had lines inserted.
    #[error("integrity check failed at line {line}: expected hash {expected}, got {actual}")]
    IntegrityViolation {
        line: usize,
        expected: String,
        actual: String,
    },
}
