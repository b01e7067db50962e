//! Tests for [`llm_client::OpenAILlmClient`] that need no real API.
//!
//! External interactions: a TCP connect to a closed local port (refused immediately).

use std::time::Duration;

use llm_client::{LlmClient, LlmConfig, OpenAILlmClient, DEFAULT_MODEL};
use prompt::ChatMessage;

/// **Test: from_config carries the configured model.**
#[test]
fn from_config_uses_configured_model() {
    let config = LlmConfig {
        api_key: "gsk_test".to_string(),
        base_url: "http://127.0.0.1:9/v1".to_string(),
        model: "llama-3.1-8b-instant".to_string(),
        timeout: Duration::from_secs(3),
    };
    let client = OpenAILlmClient::from_config(&config);
    assert_eq!(client.model(), "llama-3.1-8b-instant");
}

/// **Test: the default model is the companion's default.**
#[test]
fn new_uses_default_model() {
    let client = OpenAILlmClient::new("gsk_test".to_string());
    assert_eq!(client.model(), DEFAULT_MODEL);
}

/// **Test: an unreachable endpoint surfaces as an error, not a panic or an empty reply.**
#[tokio::test]
async fn unreachable_endpoint_is_an_error() {
    let client =
        OpenAILlmClient::with_base_url("gsk_test".to_string(), "http://127.0.0.1:9/v1".to_string())
            .with_timeout(Duration::from_secs(5));
    let result = client
        .get_llm_response_with_messages(vec![ChatMessage::user("Hi")])
        .await;
    assert!(result.is_err());
}
