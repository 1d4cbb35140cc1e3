//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// LLM configuration interface for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn system_prompt(&self) -> Option<&str>;
    fn max_tokens(&self) -> u32;
    fn temperature(&self) -> f32;
    fn timeout_secs(&self) -> u64;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_system_prompt: Option<String>,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.llm_api_key
    }
    fn base_url(&self) -> &str {
        &self.llm_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
    fn max_tokens(&self) -> u32 {
        self.llm_max_tokens
    }
    fn temperature(&self) -> f32 {
        self.llm_temperature
    }
    fn timeout_secs(&self) -> u64 {
        self.llm_timeout_secs
    }
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl EnvLlmConfig {
    /// Load from environment variables. LLM_API_KEY (or OPENAI_API_KEY) is required.
    pub fn from_env() -> Result<Self> {
        let llm_api_key = env::var("LLM_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .context("LLM_API_KEY (or OPENAI_API_KEY) not set")?;
        let llm_base_url = env::var("LLM_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let llm_system_prompt = env::var("LLM_SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let llm_timeout_secs = parsed("LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if llm_timeout_secs == 0 {
            anyhow::bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }
        Ok(Self {
            llm_api_key,
            llm_base_url,
            llm_model,
            llm_system_prompt,
            llm_max_tokens: parsed("LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            llm_temperature: parsed("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?,
            llm_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LLM_API_KEY",
        "OPENAI_API_KEY",
        "LLM_BASE_URL",
        "OPENAI_BASE_URL",
        "MODEL",
        "LLM_SYSTEM_PROMPT",
        "LLM_MAX_TOKENS",
        "LLM_TEMPERATURE",
        "LLM_TIMEOUT_SECS",
    ];

    fn clear() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn defaults_point_at_deepseek() {
        clear();
        env::set_var("LLM_API_KEY", "sk-test");
        let cfg = EnvLlmConfig::from_env().unwrap();
        assert_eq!(cfg.api_key(), "sk-test");
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.model(), "deepseek-chat");
        assert_eq!(cfg.max_tokens(), 2000);
        assert!((cfg.temperature() - 0.7).abs() < f32::EPSILON);
        assert_eq!(cfg.timeout_secs(), 120);
        assert!(cfg.system_prompt().is_none());
        clear();
    }

    #[test]
    #[serial]
    fn openai_key_is_accepted_as_fallback() {
        clear();
        env::set_var("OPENAI_API_KEY", "sk-openai");
        env::set_var("LLM_TIMEOUT_SECS", "15");
        env::set_var("LLM_SYSTEM_PROMPT", "   ");
        let cfg = EnvLlmConfig::from_env().unwrap();
        assert_eq!(cfg.api_key(), "sk-openai");
        assert_eq!(cfg.timeout_secs(), 15);
        assert!(cfg.system_prompt().is_none());
        clear();
    }

    #[test]
    #[serial]
    fn missing_key_and_bad_numbers_are_errors() {
        clear();
        assert!(EnvLlmConfig::from_env().is_err());
        env::set_var("LLM_API_KEY", "sk-test");
        env::set_var("LLM_MAX_TOKENS", "lots");
        assert!(EnvLlmConfig::from_env().is_err());
        clear();
    }

    #[test]
    #[serial]
    fn zero_timeout_is_rejected() {
        clear();
        env::set_var("LLM_API_KEY", "sk-test");
        env::set_var("LLM_TIMEOUT_SECS", "0");
        let err = EnvLlmConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("LLM_TIMEOUT_SECS"));
        clear();
    }
}
