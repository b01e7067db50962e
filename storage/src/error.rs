//! Storage error types.
//!
//! Only writes and unreadable files surface as errors; malformed content is handled by the
//! stores themselves (skipped blocks, empty memory state).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing a durable store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
