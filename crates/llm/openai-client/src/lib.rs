//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for single-shot, non-streaming chat completion.
//! Works against any OpenAI-compatible base URL (OpenAI, Groq, local proxies).
//! Provides token masking for safe logging.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}

/// Chat completion client. Wraps the async-openai client; the API key is kept only for masked
/// logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and the default OpenAI base URL.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    /// Builds a client with a custom base URL (e.g. `https://api.groq.com/openai/v1`).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = api_key.clone();
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging,
        }
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key_for_logging)
    }

    /// Sends a chat completion request and returns the first choice's text.
    ///
    /// Logs the masked API key and token usage; the request JSON goes to `debug`.
    /// A response without choices is an error; a choice without content is an empty string.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in chat completion response"),
        }
    }
}
