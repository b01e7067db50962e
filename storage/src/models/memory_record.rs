//! Memory record model for persistence.
//!
//! Maps to the JSON document written by [`crate::MemoryFileStore`]:
//!
//! ```json
//! {
//!   "persistent_memory": "...",
//!   "persistent_last_updated": "2024-05-01T10:20:30Z",
//!   "ephemeral_memory": "...",
//!   "ephemeral_last_updated": "2024-05-01T10:20:30Z"
//! }
//! ```
//!
//! Timestamps are written as RFC 3339. On read, naive ISO-8601 local times
//! (`2024-05-01T10:20:30.123456`) are accepted too; missing or unparsable timestamps
//! read as the epoch sentinel and missing texts as empty.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use memory_core::{epoch, MemoryState};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryRecord {
    #[serde(default)]
    pub persistent_memory: String,
    #[serde(default = "epoch", deserialize_with = "lenient_instant")]
    pub persistent_last_updated: DateTime<Utc>,
    #[serde(default)]
    pub ephemeral_memory: String,
    #[serde(default = "epoch", deserialize_with = "lenient_instant")]
    pub ephemeral_last_updated: DateTime<Utc>,
}

impl MemoryRecord {
    /// Record for a save at `now`: both timestamps are refreshed.
    pub fn stamped(persistent: &str, ephemeral: &str, now: DateTime<Utc>) -> Self {
        Self {
            persistent_memory: persistent.to_string(),
            persistent_last_updated: now,
            ephemeral_memory: ephemeral.to_string(),
            ephemeral_last_updated: now,
        }
    }

    pub fn into_state(self) -> MemoryState {
        MemoryState {
            persistent: self.persistent_memory,
            ephemeral: self.ephemeral_memory,
            ephemeral_last_updated: self.ephemeral_last_updated,
        }
    }
}

/// Parses RFC 3339, or a naive ISO-8601 date-time interpreted in local time.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_instant).unwrap_or_else(epoch))
}
