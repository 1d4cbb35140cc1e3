//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the text generator seen by the bot) and an OpenAI-compatible
//! implementation. Transport-agnostic; the bot only ever sees [`GenerationError`].

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};
use thiserror::Error;

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_llm::OpenAILlmClient;

/// Why a completion is unavailable. No variant carries a fallback text.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("text generation timed out after {0}s")]
    Timeout(u64),
    #[error("text generation returned an empty result")]
    Empty,
    #[error("text generation failed: {0}")]
    Api(String),
}

/// LLM client interface: request a completion for a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages. Implementations add the system prompt.
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GenerationError>;

    /// Single-instruction convenience: one user message.
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        self.get_llm_response_with_messages(vec![ChatMessage::user(instruction)])
            .await
    }
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> anyhow::Result<ChatCompletionRequestMessage> {
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
