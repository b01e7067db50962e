//! companion CLI: chat with the companion, inspect stored history and memory. Config from env
//! (and `.env`) plus CLI args.

mod chat;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use companion_core::init_tracing;

use crate::chat::{run_chat_loop, show_history, show_memory, ChatOptions};
use crate::config::{load_policy, CompanionConfig, StorePaths};

#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "Companion chat with long-term and mood memory", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and chat (default). Reads lines from stdin until EOF or /exit.
    Chat {
        /// Send this message first, then continue interactively.
        #[arg(short, long)]
        first: Option<String>,
        /// Do not print stored history after login.
        #[arg(long)]
        no_replay: bool,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
        /// Also print logs to stderr.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the stored conversation history.
    History {
        /// Only the last N turns.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the stored memory record and whether mood memory is stale.
    Memory,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Chat {
        first: None,
        no_replay: false,
        username: None,
        password: None,
        verbose: false,
    });

    match command {
        Commands::Chat {
            first,
            no_replay,
            username,
            password,
            verbose,
        } => {
            let config = CompanionConfig::load()?;
            init_tracing(&config.paths.log_file, verbose)?;
            tracing::info!(
                model = %config.llm.model,
                base_url = %config.llm.base_url,
                "Companion starting"
            );
            let options = ChatOptions {
                first_message: first,
                replay: !no_replay,
                username,
                password,
            };
            run_chat_loop(config, options).await
        }
        Commands::History { limit } => {
            let paths = StorePaths::from_env();
            show_history(&paths.history_file, limit).await
        }
        Commands::Memory => {
            let paths = StorePaths::from_env();
            show_memory(&paths.memory_file, &load_policy()?).await
        }
    }
}
