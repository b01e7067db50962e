//! # Memory Core
//!
//! Data model shared by the stores, the context assembler and the memory updater.
//!
//! ## Modules
//!
//! - [`types`] - Turn, TurnRole, the epoch sentinel
//! - [`state`] - MemoryState (persistent + ephemeral memory)

pub mod state;
pub mod types;

pub use state::*;
pub use types::*;
