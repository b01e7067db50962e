//! Integration tests for [`storage::HistoryStore`].
//!
//! Uses a temp directory per test; no shared files.

use memory_core::TurnRole;
use storage::HistoryStore;

/// **Test: Appended single-line pairs reload as the same ordered (role, content) pairs.**
///
/// **Setup:** Fresh temp dir; append three pairs.
/// **Expected:** Six turns, user/assistant alternating, contents in append order, all reloaded.
#[tokio::test]
async fn append_then_load_round_trips_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("conversation_history.txt"));
    let pairs = [
        ("Hi", "Hey you, how was your day?"),
        ("Tired. My boss yelled at me", "Come here, tell me everything."),
        ("我今天很开心", "太好了，寶貝！"),
    ];
    for (user, ai) in &pairs {
        store.append(user, ai).await.unwrap();
    }

    let turns = store.load_all().await.unwrap();

    assert_eq!(turns.len(), pairs.len() * 2);
    for (i, (user, ai)) in pairs.iter().enumerate() {
        assert_eq!(turns[2 * i].role, TurnRole::User);
        assert_eq!(turns[2 * i].content, *user);
        assert_eq!(turns[2 * i + 1].role, TurnRole::Assistant);
        assert_eq!(turns[2 * i + 1].content, *ai);
    }
    assert!(turns.iter().all(|t| t.is_reloaded()));
}

/// **Test: A missing file is an empty history, not an error.**
#[tokio::test]
async fn load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("absent.txt"));
    assert!(store.load_all().await.unwrap().is_empty());
}

/// **Test: The on-disk layout is `User: ..\nAI: ..` blocks separated by a blank line.**
#[tokio::test]
async fn file_layout_matches_block_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("history.txt");
    let store = HistoryStore::new(&path);

    store.append("Hi", "Hello!").await.unwrap();
    store.append("Bye", "Sleep well").await.unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(raw, "User: Hi\nAI: Hello!\n\nUser: Bye\nAI: Sleep well\n\n");
}

/// **Test: Malformed blocks written by hand are skipped; good blocks around them survive.**
#[tokio::test]
async fn malformed_blocks_are_skipped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    tokio::fs::write(
        &path,
        "User: first\nAI:   one\n\nnot a block\n\nAI: swapped\nUser: lines\n\nUser: last\nAI: two\n\n",
    )
    .await
    .unwrap();

    let turns = HistoryStore::new(&path).load_all().await.unwrap();
    let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "one", "last", "two"]);
}

/// **Test: A log written with CRLF line endings reloads every block.**
#[tokio::test]
async fn crlf_log_reloads_all_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    tokio::fs::write(
        &path,
        "User: a\r\nAI: b\r\n\r\nUser: c\r\nAI:   d\r\n\r\n",
    )
    .await
    .unwrap();

    let turns = HistoryStore::new(&path).load_all().await.unwrap();
    let contents: Vec<&str> = turns.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["a", "b", "c", "d"]);
    assert_eq!(turns[3].role, TurnRole::Assistant);
}
