//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the model gateway seen by the rest of the workspace) and an
//! OpenAI-compatible implementation. Requests are single-shot and non-streaming; every call is
//! at-most-once, no retries.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use openai_llm::OpenAILlmClient;

/// Model gateway: ordered role-tagged messages in, one text completion out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for `messages`, sent exactly as given.
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
