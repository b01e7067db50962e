//! # Context Assembler
//!
//! Builds the exact message list sent to the model for a reply.
//!
//! ## Order
//!
//! 1. System: persona
//! 2. System: persistent memory (full text)
//! 3. System: ephemeral memory, prefixed with a staleness warning when older than the TTL
//! 4. The last `max_context_msgs` turns of history, original order and roles
//! 5. User: the current input
//!
//! The history passed in must not already contain the current input. The result is sent
//! verbatim; nothing here retries or repairs it.

use chrono::{DateTime, Utc};
use memory_core::{MemoryState, Turn};
use prompt::{
    ephemeral_memory_section, persistent_memory_section, stale_ephemeral, ChatMessage,
    DEFAULT_PERSONA,
};
use tracing::debug;

use crate::policy::MemoryPolicy;
use crate::transcript::{last_turns, turn_to_message};

#[derive(Debug, Clone)]
pub struct ContextAssembler {
    persona: String,
    policy: MemoryPolicy,
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            policy: MemoryPolicy::default(),
        }
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_policy(mut self, policy: MemoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn policy(&self) -> &MemoryPolicy {
        &self.policy
    }

    /// Builds the reply request at the current time.
    pub fn build_prompt(
        &self,
        user_input: &str,
        memory: &MemoryState,
        history: &[Turn],
    ) -> Vec<ChatMessage> {
        self.build_prompt_at(Utc::now(), user_input, memory, history)
    }

    /// Builds the reply request as of `now`.
    pub fn build_prompt_at(
        &self,
        now: DateTime<Utc>,
        user_input: &str,
        memory: &MemoryState,
        history: &[Turn],
    ) -> Vec<ChatMessage> {
        let stale = memory.is_ephemeral_stale(now, self.policy.ephemeral_ttl());
        let ephemeral = if stale {
            stale_ephemeral(&memory.ephemeral, self.policy.ephemeral_ttl_hours)
        } else {
            memory.ephemeral.clone()
        };

        let recent = last_turns(history, self.policy.max_context_msgs);
        debug!(
            stale_ephemeral = stale,
            history_len = history.len(),
            included = recent.len(),
            "Assembling reply context"
        );

        let mut messages = Vec::with_capacity(recent.len() + 4);
        messages.push(ChatMessage::system(self.persona.clone()));
        messages.push(ChatMessage::system(persistent_memory_section(
            &memory.persistent,
        )));
        messages.push(ChatMessage::system(ephemeral_memory_section(&ephemeral)));
        messages.extend(recent.iter().map(turn_to_message));
        messages.push(ChatMessage::user(user_input));
        messages
    }
}
