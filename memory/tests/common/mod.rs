//! Scripted model gateway for tests: replies are queued up front, every request is recorded.
//! No network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use llm_client::LlmClient;
use prompt::ChatMessage;

#[derive(Clone, Default)]
pub struct ScriptedLlm {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    /// Queues a failing call.
    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push(messages);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}
