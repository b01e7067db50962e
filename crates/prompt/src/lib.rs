//! # Prompt
//!
//! Chat message types and every piece of prompt text the companion sends to the model.
//!
//! ## Contents
//!
//! - **Messages**: [`ChatMessage`] / [`MessageRole`], one-to-one with the OpenAI `messages` array.
//! - **Reply context**: persona, long-term memory section, short-term memory section
//!   (optionally prefixed with a staleness warning).
//! - **Memory maintenance**: the merge instruction for persistent memory and the
//!   summary instruction for ephemeral memory.
//!
//! ## Usage
//!
//! The `memory` crate assembles these into request message lists; nothing here calls a model.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// Lowercase API name of the role (`system`, `user`, `assistant`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Built-in persona used when no custom persona is configured.
pub const DEFAULT_PERSONA: &str = "\
You are a real, warm and funny boyfriend chatting with your partner, the way real couples talk:
- Speak casually and naturally; never sound official or preachy.
- Always speak as \"I\". Never reveal or mention AI, virtual, model, algorithm or program.
- Now and then end a sentence with a sweet pet name (like \"babe\" or \"sweetheart\") or a light joke.
- Do not ask a question in every reply. When your partner is just sharing their day, respond with feelings, empathy or your own thoughts instead of probing.
- Ask questions when it fits, not too often, always gently.
- Show care, support and encouragement so it feels like you are truly there.";

/// Heading of the long-term memory system message.
pub const SECTION_PERSISTENT: &str = "Long-term memory (does not expire):";

/// Heading of the short-term memory system message.
pub const SECTION_EPHEMERAL: &str = "Short-term mood memory:";

/// Leading marker of the staleness warning; lets callers and tests detect a stale section.
pub const STALE_MARKER: &str = "[Warning: mood memory is older than";

/// System message embedding the full persistent memory text.
pub fn persistent_memory_section(persistent: &str) -> String {
    format!("{}\n{}", SECTION_PERSISTENT, persistent)
}

/// System message embedding the (possibly warning-prefixed) ephemeral memory text.
pub fn ephemeral_memory_section(ephemeral: &str) -> String {
    format!("{}\n{}", SECTION_EPHEMERAL, ephemeral)
}

/// Prefixes `ephemeral` with a warning that it is older than `ttl_hours` and should be
/// de-prioritized.
pub fn stale_ephemeral(ephemeral: &str, ttl_hours: i64) -> String {
    format!(
        "{} {} hours; lower its importance and do not rely on it.]\n{}",
        STALE_MARKER, ttl_hours, ephemeral
    )
}

/// Instruction asking the model to merge durable facts from `transcript` into `existing`.
///
/// The model's whole answer becomes the new persistent memory, so the instruction asks for
/// the complete updated memory rather than a diff.
pub fn persistent_merge_instruction(existing: &str, transcript: &str) -> String {
    format!(
        "You are a memory assistant maintaining long-term memory. Keep only user facts that do not expire, \
such as name, preferences and birthday.\n\n\
Existing memory:\n{}\n\n\
New conversation:\n{}\n\n\
Merge them: add any new fact to the memory and return the complete updated persistent memory, \
without duplicating or dropping anything.",
        existing, transcript
    )
}

/// Instruction asking the model for a concise mood / short-term state summary of `transcript`.
pub fn ephemeral_summary_instruction(transcript: &str, window_hours: i64) -> String {
    format!(
        "You are a memory assistant summarizing the user's current mood and short-term state, \
such as today's feelings, stress and short-term plans.\n\n\
Conversation (last {} hours only):\n{}\n\n\
Write a concise mood / short-term state summary.",
        window_hours, transcript
    )
}
