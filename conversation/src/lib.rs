//! # Conversation
//!
//! The conversation loop for a single authenticated session. Turns are processed strictly one
//! at a time (`take_turn` borrows the session mutably); the three model calls of a turn are
//! awaited in sequence.
//!
//! ## External interactions
//!
//! - **Model gateway**: reply, persistent merge, ephemeral summary.
//! - **Files**: history log (append), memory record (overwrite).

mod session;

pub use session::{Session, TurnOutcome, TurnPhase};
