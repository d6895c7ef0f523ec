//! Error types for story loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for story operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors that can occur while reading or writing a story.
#[derive(Debug, Error)]
pub enum StoryError {
    /// The story file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The story JSON is malformed or has the wrong shape.
    #[error("invalid story file: {0}")]
    Parse(#[source] serde_json::Error),

    /// The story could not be serialized.
    #[error("cannot serialize story: {0}")]
    Serialize(#[source] serde_json::Error),
}
