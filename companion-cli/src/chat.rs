//! Interactive chat: login, history replay, then one turn per stdin line until EOF or /exit.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use companion_core::{AuthGate, AuthenticatedUser, CompanionError};
use conversation::Session;
use llm_client::OpenAILlmClient;
use memory::MemoryPolicy;
use memory_core::{MemoryState, Turn, TurnRole};
use storage::{HistoryStore, MemoryFileStore};
use tracing::{info, warn};

use crate::config::CompanionConfig;

const MAX_LOGIN_ATTEMPTS: usize = 3;

pub struct ChatOptions {
    pub first_message: Option<String>,
    pub replay: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

pub fn print_help() {
    println!("Available commands:");
    println!("  /help    - Show this help message");
    println!("  /memory  - Show current long-term and mood memory");
    println!("  /exit    - Exit the chat");
    println!("  /quit    - Exit the chat");
    println!("  Any other text is sent to your companion.");
}

fn prompt_line(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Credentials from flags are tried once; otherwise asks on stdin up to
/// [`MAX_LOGIN_ATTEMPTS`] times.
fn login(
    gate: &AuthGate,
    username: Option<String>,
    password: Option<String>,
) -> Result<AuthenticatedUser> {
    if let (Some(u), Some(p)) = (username, password) {
        return Ok(gate.authenticate(&u, &p)?);
    }
    for _ in 0..MAX_LOGIN_ATTEMPTS {
        let Some(u) = prompt_line("Username: ")? else {
            break;
        };
        let Some(p) = prompt_line("Password: ")? else {
            break;
        };
        match gate.authenticate(u.trim(), &p) {
            Ok(user) => return Ok(user),
            Err(e) => println!("{}", e),
        }
    }
    Err(CompanionError::Unauthorized.into())
}

fn speaker(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "You",
        TurnRole::Assistant => "AI",
    }
}

pub fn print_turns(turns: &[Turn]) {
    for turn in turns {
        println!("{}: {}", speaker(turn.role), turn.content);
    }
}

fn format_instant(at: DateTime<Utc>, state_empty: bool) -> String {
    if state_empty {
        "never".to_string()
    } else {
        at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Human-readable view of both memory layers as of `now`.
pub fn describe_memory(memory: &MemoryState, policy: &MemoryPolicy, now: DateTime<Utc>) -> String {
    let never = memory.ephemeral_last_updated == memory_core::epoch();
    let stale = memory.is_ephemeral_stale(now, policy.ephemeral_ttl());
    let or_none = |s: &str| {
        if s.trim().is_empty() {
            "(empty)".to_string()
        } else {
            s.to_string()
        }
    };
    format!(
        "Long-term memory:\n{}\n\nMood memory (updated {}{}):\n{}",
        or_none(&memory.persistent),
        format_instant(memory.ephemeral_last_updated, never),
        if stale { ", stale" } else { "" },
        or_none(&memory.ephemeral),
    )
}

async fn run_one_turn(session: &mut Session, thinking_message: &str, content: &str) {
    println!("{}", thinking_message);
    match session.take_turn(content).await {
        Ok(outcome) => {
            println!("AI: {}", outcome.reply);
            if let Some(e) = outcome.memory_error {
                eprintln!("(Memory was not updated this turn: {})", e);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("(You can continue chatting or type /exit to quit)");
        }
    }
}

/// Logs in, opens the session and runs the loop. Returns when stdin closes or on /exit.
pub async fn run_chat_loop(config: CompanionConfig, options: ChatOptions) -> Result<()> {
    let user = login(&config.auth_gate(), options.username, options.password)?;
    info!(user = %user.username(), "Starting chat");

    let llm = Arc::new(OpenAILlmClient::from_config(&config.llm));
    let mut session = Session::open(
        user,
        HistoryStore::new(&config.paths.history_file),
        MemoryFileStore::new(&config.paths.memory_file),
        llm,
    )
    .await?
    .with_policy(config.policy);
    if let Some(persona) = &config.persona {
        session = session.with_persona(persona.clone());
    }

    println!(
        "Logged in as {}. Type /help for commands, /exit to quit.",
        session.user().username()
    );
    if options.replay && !session.history().is_empty() {
        println!();
        print_turns(session.history());
    }
    println!();

    if let Some(m) = options.first_message {
        println!("> {}", m);
        run_one_turn(&mut session, &config.thinking_message, &m).await;
        println!();
    }

    loop {
        let Some(line) = prompt_line("> ")? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "/help" => {
                print_help();
                continue;
            }
            "/memory" => {
                println!(
                    "{}",
                    describe_memory(session.memory(), session.assembler().policy(), Utc::now())
                );
                continue;
            }
            "/exit" | "/quit" => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }

        run_one_turn(&mut session, &config.thinking_message, line).await;
        println!();
    }
    Ok(())
}

/// `history` subcommand: the stored log as it would be reloaded.
pub async fn show_history(history_file: &str, limit: Option<usize>) -> Result<()> {
    let turns = HistoryStore::new(history_file).load_all().await?;
    if turns.is_empty() {
        println!("No conversation history in {}", history_file);
        return Ok(());
    }
    let start = limit.map_or(0, |n| turns.len().saturating_sub(n));
    println!("{} turns in {}", turns.len(), history_file);
    print_turns(&turns[start..]);
    Ok(())
}

/// `memory` subcommand: the stored record, read leniently.
pub async fn show_memory(memory_file: &str, policy: &MemoryPolicy) -> Result<()> {
    let store = MemoryFileStore::new(memory_file);
    let state = match store.load_record().await {
        Ok(Some(record)) => record.into_state(),
        Ok(None) => {
            println!("No memory saved yet in {}", memory_file);
            return Ok(());
        }
        Err(e) => {
            warn!(error = %e, "Memory record unreadable");
            println!(
                "Memory record in {} is unreadable ({}); it will be treated as empty",
                memory_file, e
            );
            return Ok(());
        }
    };
    println!("{}", describe_memory(&state, policy, Utc::now()));
    Ok(())
}
