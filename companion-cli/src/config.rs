//! Companion configuration, loaded from environment variables (after `.env`).

use std::env;
use std::str::FromStr;

use companion_core::{AuthGate, CompanionError, Result, DEFAULT_PASSWORD, DEFAULT_USERNAME};
use llm_client::LlmConfig;
use memory::{MemoryPolicy, EPHEMERAL_TTL_HOURS, EPHEMERAL_WINDOW_HOURS, MAX_CONTEXT_MSGS};

pub const DEFAULT_HISTORY_FILE: &str = "conversation_history.txt";
pub const DEFAULT_MEMORY_FILE: &str = "memory.json";
pub const DEFAULT_LOG_FILE: &str = "logs/companion.log";
pub const DEFAULT_THINKING_MESSAGE: &str = "Thinking...";

/// File locations. Needed by every subcommand, including the ones that never call the model.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub history_file: String,
    pub memory_file: String,
    pub log_file: String,
}

impl StorePaths {
    pub fn from_env() -> Self {
        Self {
            history_file: var_or("HISTORY_FILE", DEFAULT_HISTORY_FILE),
            memory_file: var_or("MEMORY_FILE", DEFAULT_MEMORY_FILE),
            log_file: var_or("LOG_FILE", DEFAULT_LOG_FILE),
        }
    }
}

pub struct CompanionConfig {
    pub llm: LlmConfig,
    pub paths: StorePaths,
    /// `None` keeps the built-in persona.
    pub persona: Option<String>,
    pub thinking_message: String,
    pub policy: MemoryPolicy,
    pub username: String,
    pub password: String,
}

impl CompanionConfig {
    /// Loads everything; a missing API key or a bad policy value is a config error.
    pub fn load() -> Result<Self> {
        let paths = StorePaths::from_env();
        let llm = LlmConfig::from_env().map_err(|e| CompanionError::Config(format!("{:#}", e)))?;
        let policy = load_policy()?;

        Ok(Self {
            llm,
            paths,
            persona: env::var("PERSONA_PROMPT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            thinking_message: var_or("THINKING_MESSAGE", DEFAULT_THINKING_MESSAGE),
            policy,
            username: var_or("COMPANION_USERNAME", DEFAULT_USERNAME),
            password: var_or("COMPANION_PASSWORD", DEFAULT_PASSWORD),
        })
    }

    pub fn auth_gate(&self) -> AuthGate {
        AuthGate::new(self.username.clone(), self.password.clone())
    }
}

/// TTL, window and context size; each falls back to its default when unset. Hours outside
/// `1..=MAX_POLICY_HOURS` are a config error.
pub fn load_policy() -> Result<MemoryPolicy> {
    let policy = MemoryPolicy {
        ephemeral_ttl_hours: parse_var("EPHEMERAL_TTL_HOURS", EPHEMERAL_TTL_HOURS)?,
        ephemeral_window_hours: parse_var("EPHEMERAL_WINDOW_HOURS", EPHEMERAL_WINDOW_HOURS)?,
        max_context_msgs: parse_var("MAX_CONTEXT_MSGS", MAX_CONTEXT_MSGS)?,
    };
    policy
        .validate()
        .map_err(|e| CompanionError::Config(e.to_string()))?;
    Ok(policy)
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(s) => s
            .trim()
            .parse()
            .map_err(|_| CompanionError::Config(format!("{} must be a number, got {:?}", key, s))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 15] = [
        "GROQ_API_KEY",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "MODEL",
        "GATEWAY_TIMEOUT_SECS",
        "HISTORY_FILE",
        "MEMORY_FILE",
        "LOG_FILE",
        "PERSONA_PROMPT",
        "THINKING_MESSAGE",
        "EPHEMERAL_TTL_HOURS",
        "EPHEMERAL_WINDOW_HOURS",
        "MAX_CONTEXT_MSGS",
        "COMPANION_USERNAME",
        "COMPANION_PASSWORD",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults() {
        clear_env();
        env::set_var("GROQ_API_KEY", "gsk_test");

        let config = CompanionConfig::load().unwrap();

        assert_eq!(config.llm.api_key, "gsk_test");
        assert_eq!(config.paths.history_file, "conversation_history.txt");
        assert_eq!(config.paths.memory_file, "memory.json");
        assert_eq!(config.paths.log_file, "logs/companion.log");
        assert!(config.persona.is_none());
        assert_eq!(config.thinking_message, "Thinking...");
        assert_eq!(config.policy, MemoryPolicy::default());
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "root");
        assert!(config.auth_gate().authenticate("root", "root").is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn overrides() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("HISTORY_FILE", "data/history.txt");
        env::set_var("PERSONA_PROMPT", "You are a cat.");
        env::set_var("EPHEMERAL_TTL_HOURS", "6");
        env::set_var("MAX_CONTEXT_MSGS", "4");
        env::set_var("COMPANION_USERNAME", "mei");
        env::set_var("COMPANION_PASSWORD", "secret");

        let config = CompanionConfig::load().unwrap();

        assert_eq!(config.paths.history_file, "data/history.txt");
        assert_eq!(config.persona.as_deref(), Some("You are a cat."));
        assert_eq!(config.policy.ephemeral_ttl_hours, 6);
        assert_eq!(config.policy.ephemeral_window_hours, 24);
        assert_eq!(config.policy.max_context_msgs, 4);
        assert!(config.auth_gate().authenticate("root", "root").is_err());
        assert!(config.auth_gate().authenticate("mei", "secret").is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn store_paths_need_no_api_key() {
        clear_env();
        env::set_var("MEMORY_FILE", "data/memory.json");

        let paths = StorePaths::from_env();

        assert_eq!(paths.history_file, DEFAULT_HISTORY_FILE);
        assert_eq!(paths.memory_file, "data/memory.json");
        assert_eq!(paths.log_file, DEFAULT_LOG_FILE);
        clear_env();
    }

    #[test]
    #[serial]
    fn missing_key_is_config_error() {
        clear_env();
        assert!(matches!(
            CompanionConfig::load(),
            Err(CompanionError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn non_numeric_policy_is_config_error() {
        clear_env();
        env::set_var("GROQ_API_KEY", "gsk_test");
        env::set_var("EPHEMERAL_WINDOW_HOURS", "a day");

        let err = CompanionConfig::load().err().unwrap();

        assert!(err.to_string().contains("EPHEMERAL_WINDOW_HOURS"));
        clear_env();
    }

    #[test]
    #[serial]
    fn out_of_range_policy_is_config_error() {
        for (key, value) in [
            ("EPHEMERAL_TTL_HOURS", "10000000000000"),
            ("EPHEMERAL_WINDOW_HOURS", "10000000000"),
            ("EPHEMERAL_TTL_HOURS", "-1"),
            ("EPHEMERAL_WINDOW_HOURS", "0"),
        ] {
            clear_env();
            env::set_var("GROQ_API_KEY", "gsk_test");
            env::set_var(key, value);

            match CompanionConfig::load() {
                Err(CompanionError::Config(msg)) => assert!(msg.contains(key), "{}", msg),
                other => panic!("{}={} accepted: {:?}", key, value, other.err()),
            }
        }
        clear_env();
    }
}
