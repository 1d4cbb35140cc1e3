//! Tests for [`llm_client::OpenAILlmClient`] against a mock OpenAI-compatible endpoint.

use std::time::Duration;

use llm_client::{GenerationError, LlmClient, OpenAILlmClient};

fn completion(content: &str) -> String {
    format!(
        r#"{{"id":"c1","object":"chat.completion","created":1,"model":"deepseek-chat",
"choices":[{{"index":0,"message":{{"role":"assistant","content":{}}},"finish_reason":"stop"}}]}}"#,
        serde_json_string(content)
    )
}

fn serde_json_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
}

/// **Test: The system prompt is sent first, the instruction second, and the reply is trimmed.**
#[tokio::test]
async fn generate_sends_system_then_instruction() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{"messages":[
                {"role":"system","content":"You are a professional assistant specializing in writing telegram posts."},
                {"role":"user","content":"перескажи"}
            ]}"#
            .to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("  **Итог**\nтекст  "))
        .create_async()
        .await;

    let client = OpenAILlmClient::with_base_url("sk-test-123456789".to_string(), server.url());
    let reply = client.generate("перескажи").await.unwrap();

    assert_eq!(reply, "**Итог**\nтекст");
    mock.assert_async().await;
}

/// **Test: A whitespace-only completion is reported as unavailable, not passed on.**
#[tokio::test]
async fn blank_completion_is_empty_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("   "))
        .create_async()
        .await;

    let client = OpenAILlmClient::with_base_url("sk-test-123456789".to_string(), server.url());
    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(err, GenerationError::Empty));
}

/// **Test: Unreachable endpoint within a short timeout surfaces as an error, never hangs.**
#[tokio::test]
async fn unreachable_endpoint_is_error() {
    let client = OpenAILlmClient::with_base_url(
        "sk-test-123456789".to_string(),
        "http://127.0.0.1:9".to_string(),
    )
    .with_timeout(Duration::from_secs(5));

    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Api(_) | GenerationError::Timeout(_)
    ));
}
