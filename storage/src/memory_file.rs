//! Memory store: one JSON record holding both memory layers and their timestamps.
//!
//! Reading never fails: an absent record is the empty initial state and an unreadable or
//! malformed one is logged and treated the same way. Writes replace the whole record through a
//! temp file + rename.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use memory_core::MemoryState;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::models::MemoryRecord;

#[derive(Debug, Clone)]
pub struct MemoryFileStore {
    path: PathBuf,
}

impl MemoryFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored record, if any. `Ok(None)` when the file does not exist.
    pub async fn load_record(&self) -> Result<Option<MemoryRecord>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Returns the stored memory, or empty texts with the epoch sentinel when there is no
    /// usable record.
    pub async fn load(&self) -> MemoryState {
        match self.load_record().await {
            Ok(Some(record)) => record.into_state(),
            Ok(None) => {
                info!(path = %self.path.display(), "No memory record yet, starting empty");
                MemoryState::default()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Unusable memory record, starting empty"
                );
                MemoryState::default()
            }
        }
    }

    /// Overwrites the record, stamping both timestamps with the current time.
    pub async fn save(
        &self,
        persistent: &str,
        ephemeral: &str,
    ) -> Result<MemoryState, StorageError> {
        self.save_at(Utc::now(), persistent, ephemeral).await
    }

    /// Overwrites the record, stamping both timestamps with `now`. Both are refreshed even if
    /// only one text changed; the ephemeral TTL reads only the ephemeral timestamp.
    pub async fn save_at(
        &self,
        now: DateTime<Utc>,
        persistent: &str,
        ephemeral: &str,
    ) -> Result<MemoryState, StorageError> {
        let record = MemoryRecord::stamped(persistent, ephemeral, now);
        let json = serde_json::to_string_pretty(&record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StorageError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;

        debug!(path = %self.path.display(), "Saved memory record");
        Ok(record.into_state())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
