//! Storage crate: durable history log and memory record.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MemoryRecord (JSON form of the memory state)
//! - [`history`] – HistoryStore (plain-text `User:` / `AI:` log)
//! - [`memory_file`] – MemoryFileStore (JSON record)

mod error;
mod history;
mod memory_file;
mod models;

pub use error::StorageError;
pub use history::{format_block, parse_history, HistoryStore};
pub use memory_file::MemoryFileStore;
pub use models::{parse_instant, MemoryRecord};
