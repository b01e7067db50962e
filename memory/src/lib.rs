//! # Memory
//!
//! Context assembly and memory maintenance for the companion.
//!
//! ## Modules
//!
//! - [`policy`] - TTL, window and context-size settings
//! - [`assembler`] - ContextAssembler: reply request from persona, memories and recent turns
//! - [`updater`] - MemoryUpdater: persistent merge and ephemeral summary via the model
//! - [`transcript`] - turn formatting and window selection
//!
//! ## External interactions
//!
//! - **Model gateway**: [`MemoryUpdater`] calls [`llm_client::LlmClient`] twice per turn.

pub mod assembler;
pub mod policy;
pub mod transcript;
pub mod updater;

pub use assembler::ContextAssembler;
pub use policy::{
    MemoryPolicy, EPHEMERAL_TTL_HOURS, EPHEMERAL_WINDOW_HOURS, MAX_CONTEXT_MSGS, MAX_POLICY_HOURS,
};
pub use updater::{MemoryUpdate, MemoryUpdater};
