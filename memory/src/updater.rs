//! # Memory Updater
//!
//! Regenerates both memory layers after a completed turn with two further model calls.
//!
//! - **Persistent**: the whole history plus the old persistent memory go into a merge
//!   instruction; the model's full answer replaces the persistent memory.
//! - **Ephemeral**: only turns inside the recent window (never reloaded ones) go into a mood
//!   summary instruction; the model's full answer replaces the ephemeral memory.
//!
//! Calls are strictly sequential and never retried. A failure is returned to the caller and
//! nothing is committed.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use llm_client::LlmClient;
use memory_core::{MemoryState, Turn};
use prompt::{ephemeral_summary_instruction, persistent_merge_instruction, ChatMessage};
use tracing::{debug, info, instrument};

use crate::policy::MemoryPolicy;
use crate::transcript::{plain_transcript, recent_window, timestamped_transcript};

/// New texts for both memory layers, produced together and committed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryUpdate {
    pub persistent: String,
    pub ephemeral: String,
}

#[derive(Clone)]
pub struct MemoryUpdater {
    llm: Arc<dyn LlmClient>,
    policy: MemoryPolicy,
}

impl MemoryUpdater {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            policy: MemoryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MemoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Merges durable facts from the entire history into `old_persistent`.
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub async fn update_persistent(
        &self,
        history: &[Turn],
        old_persistent: &str,
    ) -> Result<String> {
        let instruction = persistent_merge_instruction(old_persistent, &plain_transcript(history));
        let merged = self
            .llm
            .get_llm_response_with_messages(vec![ChatMessage::system(instruction)])
            .await
            .context("persistent memory update failed")?;
        debug!(len = merged.len(), "Persistent memory regenerated");
        Ok(merged)
    }

    /// Summarizes mood / short-term state from the recent window at the current time.
    pub async fn update_ephemeral(&self, history: &[Turn]) -> Result<String> {
        self.update_ephemeral_at(Utc::now(), history).await
    }

    /// Summarizes mood / short-term state from turns inside the window ending at `now`.
    /// An empty window still asks the model.
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub async fn update_ephemeral_at(
        &self,
        now: DateTime<Utc>,
        history: &[Turn],
    ) -> Result<String> {
        let window = recent_window(history, now, self.policy.ephemeral_window());
        debug!(window_len = window.len(), "Ephemeral window selected");
        let instruction = ephemeral_summary_instruction(
            &timestamped_transcript(&window),
            self.policy.ephemeral_window_hours,
        );
        let summary = self
            .llm
            .get_llm_response_with_messages(vec![ChatMessage::system(instruction)])
            .await
            .context("ephemeral memory update failed")?;
        debug!(len = summary.len(), "Ephemeral memory regenerated");
        Ok(summary)
    }

    /// Runs the persistent merge, then the ephemeral summary. Either failing fails the whole
    /// update.
    pub async fn update(&self, history: &[Turn], old: &MemoryState) -> Result<MemoryUpdate> {
        self.update_at(Utc::now(), history, old).await
    }

    pub async fn update_at(
        &self,
        now: DateTime<Utc>,
        history: &[Turn],
        old: &MemoryState,
    ) -> Result<MemoryUpdate> {
        let persistent = self.update_persistent(history, &old.persistent).await?;
        let ephemeral = self.update_ephemeral_at(now, history).await?;
        info!(
            persistent_len = persistent.len(),
            ephemeral_len = ephemeral.len(),
            "Memory update ready"
        );
        Ok(MemoryUpdate {
            persistent,
            ephemeral,
        })
    }
}
