//! # Core Types
//!
//! ## TurnRole
//!
//! Who produced a turn: `User` or `Assistant`. Fixed per message.
//!
//! ## Turn
//!
//! One role-tagged message with text content and a timestamp. Turns are immutable once
//! created; the conversation is an ordered, append-only `Vec<Turn>`.
//!
//! Turns reloaded from the durable history log carry the [`epoch`] sentinel because their
//! real time of day is not recorded there. Turns created in the live session carry wall-clock
//! time. Consumers that care about recency (the ephemeral memory window) rely on this: a
//! reloaded turn is never "recent".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp carried by turns whose real time is unknown (reloaded from the history log).
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Role of the author of a turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    /// Lowercase name used in transcripts (`user` / `assistant`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(TurnRole::User, content, timestamp)
    }

    pub fn assistant(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self::new(TurnRole::Assistant, content, timestamp)
    }

    /// A turn rebuilt from the history log, stamped with the epoch sentinel.
    pub fn reloaded(role: TurnRole, content: impl Into<String>) -> Self {
        Self::new(role, content, epoch())
    }

    /// True when the turn carries the epoch sentinel.
    pub fn is_reloaded(&self) -> bool {
        self.timestamp == epoch()
    }
}
