//! Turn formatting and selection shared by the assembler and the updater.

use chrono::{DateTime, Duration, Utc};
use memory_core::{Turn, TurnRole};
use prompt::ChatMessage;

/// Maps a turn to the request message with the same role and content.
pub fn turn_to_message(turn: &Turn) -> ChatMessage {
    match turn.role {
        TurnRole::User => ChatMessage::user(turn.content.clone()),
        TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
    }
}

/// The last `limit` turns, in original order.
pub fn last_turns(history: &[Turn], limit: usize) -> &[Turn] {
    &history[history.len().saturating_sub(limit)..]
}

/// `role: content` per line, over the whole history.
pub fn plain_transcript(history: &[Turn]) -> String {
    history
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turns with `timestamp >= now - window`. Turns carrying the epoch sentinel are always left
/// out, however large the window.
/// A window reaching past the representable range keeps every live turn.
pub fn recent_window(history: &[Turn], now: DateTime<Utc>, window: Duration) -> Vec<&Turn> {
    let cutoff = now.checked_sub_signed(window);
    history
        .iter()
        .filter(|t| !t.is_reloaded() && cutoff.map_or(true, |c| t.timestamp >= c))
        .collect()
}

/// `[YYYY-mm-dd HH:MM:SS] role: content` per line, local time.
pub fn timestamped_transcript(turns: &[&Turn]) -> String {
    turns
        .iter()
        .map(|t| {
            format!(
                "[{}] {}: {}",
                t.timestamp
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S"),
                t.role,
                t.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
