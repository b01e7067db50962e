//! # Memory State
//!
//! The two memory layers held by a session.
//!
//! - **Persistent**: durable facts about the user (name, preferences, birthday...). Opaque
//!   text, produced and consumed by the model, replaced in full by each merge.
//! - **Ephemeral**: short-term mood / state summary plus the instant it was last written.
//!   Once older than a TTL it is down-weighted in prompts, never deleted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::epoch;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryState {
    pub persistent: String,
    pub ephemeral: String,
    pub ephemeral_last_updated: DateTime<Utc>,
}

impl Default for MemoryState {
    /// Empty memories, ephemeral stamped with the epoch sentinel.
    fn default() -> Self {
        Self {
            persistent: String::new(),
            ephemeral: String::new(),
            ephemeral_last_updated: epoch(),
        }
    }
}

impl MemoryState {
    /// Age of the ephemeral memory at `now`.
    pub fn ephemeral_age(&self, now: DateTime<Utc>) -> Duration {
        now - self.ephemeral_last_updated
    }

    /// Strictly older than `ttl` at `now`; an age of exactly `ttl` is still fresh.
    pub fn is_ephemeral_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.ephemeral_age(now) > ttl
    }

    /// Replaces both texts and moves the ephemeral timestamp to `updated_at`, never backwards.
    pub fn advance(&mut self, persistent: String, ephemeral: String, updated_at: DateTime<Utc>) {
        self.persistent = persistent;
        self.ephemeral = ephemeral;
        if updated_at > self.ephemeral_last_updated {
            self.ephemeral_last_updated = updated_at;
        }
    }
}
