//! LlmClient backed by openai-client; sends messages verbatim and bounds each call with a timeout.

use anyhow::Result;
use async_trait::async_trait;
use prompt::ChatMessage;
use std::time::Duration;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient, LlmConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    timeout: Duration,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::with_base_url(config.api_key.clone(), config.base_url.clone())
            .with_model(config.model.clone())
            .with_timeout(config.timeout)
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model, count = messages.len()))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        match tokio::time::timeout(
            self.timeout,
            self.client.chat_completion(&self.model, openai_messages),
        )
        .await
        {
            Ok(reply) => reply,
            Err(_) => anyhow::bail!(
                "chat completion timed out after {}s",
                self.timeout.as_secs()
            ),
        }
    }
}
