//! Gateway configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the model gateway.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Upper bound for one completion call.
    pub timeout: Duration,
}

impl LlmConfig {
    /// Load from environment variables.
    ///
    /// The key is read from `GROQ_API_KEY`, falling back to `OPENAI_API_KEY`; a missing or blank
    /// key is an error. `OPENAI_BASE_URL`, `MODEL` and `GATEWAY_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GROQ_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|s| !s.trim().is_empty())
            .context("GROQ_API_KEY (or OPENAI_API_KEY) not set")?;
        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = match env::var("GATEWAY_TIMEOUT_SECS") {
            Ok(s) => s
                .parse::<u64>()
                .with_context(|| format!("GATEWAY_TIMEOUT_SECS must be a number, got {:?}", s))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            api_key,
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
