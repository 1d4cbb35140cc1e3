//! OpenAI-compatible [`LlmClient`]: wraps openai-client, prepends the system message, bounds each call with a timeout.

use async_trait::async_trait;
use openai_client::{CompletionOptions, OpenAIClient};
use prompt::{ChatMessage, DEFAULT_SYSTEM_MESSAGE};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::{
    LlmConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
use crate::{chat_message_to_openai, GenerationError, LlmClient};

/// [`LlmClient`] backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    model: String,
    system_prompt: Option<String>,
    options: CompletionOptions,
    timeout: Duration,
}

impl OpenAILlmClient {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            options: CompletionOptions {
                max_tokens: Some(DEFAULT_MAX_TOKENS),
                temperature: Some(DEFAULT_TEMPERATURE),
            },
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_system_prompt_opt(config.system_prompt().map(String::from))
            .with_options(CompletionOptions {
                max_tokens: Some(config.max_tokens()),
                temperature: Some(config.temperature()),
            })
            .with_timeout(Duration::from_secs(config.timeout_secs()))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages), fields(model = %self.model))]
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GenerationError> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        openai_messages.push(
            chat_message_to_openai(&ChatMessage::system(self.system_content()))
                .map_err(|e| GenerationError::Api(e.to_string()))?,
        );
        for msg in &messages {
            openai_messages
                .push(chat_message_to_openai(msg).map_err(|e| GenerationError::Api(e.to_string()))?);
        }

        let call = self
            .client
            .chat_completion(&self.model, openai_messages, self.options);
        let text = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(error = %e, "LLM request failed");
                return Err(GenerationError::Api(e.to_string()));
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "LLM request timed out");
                return Err(GenerationError::Timeout(self.timeout.as_secs()));
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::Empty);
        }
        info!(reply_len = text.chars().count(), "LLM response received");
        Ok(text.to_string())
    }
}
