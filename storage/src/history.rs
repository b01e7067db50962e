//! History log: append-only plain-text record of every (user, reply) pair.
//!
//! Format: blocks separated by a blank line, each block
//!
//! ```text
//! User: <text>
//! AI: <text>
//! ```
//!
//! Reloading yields two [`Turn`]s per block stamped with the epoch sentinel. Blocks that are
//! not `User:` then `AI:` are skipped. Multi-line content does not round-trip: a multi-line
//! reply reloads as its first line, and a multi-line user message pushes `AI:` off the second
//! line so the whole block is skipped.

use std::path::{Path, PathBuf};

use memory_core::{Turn, TurnRole};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::StorageError;

const USER_PREFIX: &str = "User:";
const AI_PREFIX: &str = "AI:";

/// Formats one stored block, including its trailing blank line.
pub fn format_block(user_text: &str, assistant_text: &str) -> String {
    format!("{} {}\n{} {}\n\n", USER_PREFIX, user_text, AI_PREFIX, assistant_text)
}

/// Parses the whole log into turns, user then assistant per accepted block.
///
/// Field text is whatever follows the prefix, trimmed; lines after the second are ignored.
/// CRLF line endings are read the same as LF.
pub fn parse_history(content: &str) -> Vec<Turn> {
    let content = content.replace("\r\n", "\n");
    let mut turns = Vec::new();
    for (index, block) in content.trim().split("\n\n").enumerate() {
        let lines: Vec<&str> = block.trim().lines().collect();
        if lines.is_empty() {
            continue;
        }
        let pair = match lines.as_slice() {
            [first, second, ..] => first
                .strip_prefix(USER_PREFIX)
                .zip(second.strip_prefix(AI_PREFIX)),
            _ => None,
        };
        match pair {
            Some((user, ai)) => {
                turns.push(Turn::reloaded(TurnRole::User, user.trim()));
                turns.push(Turn::reloaded(TurnRole::Assistant, ai.trim()));
            }
            None => warn!(block = index, "Skipping malformed history block"),
        }
    }
    turns
}

/// File-backed history log.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one (user, reply) block, creating the file and its parent directories if needed.
    pub async fn append(&self, user_text: &str, assistant_text: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent, e))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(format_block(user_text, assistant_text).as_bytes())
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| StorageError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "Appended history block");
        Ok(())
    }

    /// Reloads every stored turn. A missing file is an empty history; invalid UTF-8 is
    /// replaced rather than rejected.
    pub async fn load_all(&self) -> Result<Vec<Turn>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        let content = String::from_utf8_lossy(&bytes);
        let turns = parse_history(&content);
        debug!(path = %self.path.display(), turns = turns.len(), "Loaded history");
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_block_layout() {
        assert_eq!(format_block("Hi", "Hello!"), "User: Hi\nAI: Hello!\n\n");
    }

    #[test]
    fn parse_accepts_padded_ai_prefix() {
        let turns = parse_history("User: Hi\nAI:   Hello there\n\n");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "Hi");
        assert_eq!(turns[1].content, "Hello there");
        assert!(turns.iter().all(|t| t.is_reloaded()));
    }

    #[test]
    fn parse_skips_malformed_blocks() {
        let content = "User: one\nAI: uno\n\n\
                       AI: reversed\nUser: order\n\n\
                       User: lonely\n\n\
                       garbage\n\n\
                       User: two\nAI: dos\n\n";
        let turns = parse_history(content);
        let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "uno", "two", "dos"]);
    }

    #[test]
    fn multi_line_reply_keeps_first_line() {
        let turns = parse_history(&format_block("Hi", "line one\nline two"));
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, "line one");
    }

    #[test]
    fn multi_line_user_message_drops_block() {
        assert!(parse_history(&format_block("line one\nline two", "ok")).is_empty());
    }

    #[test]
    fn empty_content_is_empty_history() {
        assert!(parse_history("").is_empty());
        assert!(parse_history("\n\n\n").is_empty());
    }
}
