//! Bot configuration loaded from the environment (LLM settings live in [`llm_client::EnvLlmConfig`]).

use anyhow::{Context, Result};
use article_fetcher::DEFAULT_FETCH_TIMEOUT_SECS;
use dbot_telegram::TelegramConfig;
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/repost-bot.log";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    /// AUTHORIZED_USER_ID: the only user served.
    pub authorized_user_id: i64,
    pub log_file: String,
    /// STYLES_FILE: replaces the built-in style catalog.
    pub styles_file: Option<String>,
    pub fetch_timeout_secs: u64,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let raw_user_id =
            env::var("AUTHORIZED_USER_ID").context("AUTHORIZED_USER_ID not set")?;
        let authorized_user_id = raw_user_id
            .trim()
            .parse::<i64>()
            .with_context(|| format!("AUTHORIZED_USER_ID is not a number: {}", raw_user_id))?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let styles_file = env::var("STYLES_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let fetch_timeout_secs = match env::var("FETCH_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("FETCH_TIMEOUT_SECS is not a number: {}", raw))?,
            Err(_) => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        Ok(Self {
            telegram,
            authorized_user_id,
            log_file,
            styles_file,
            fetch_timeout_secs,
        })
    }

    /// Validate config: optional URLs must parse, timeouts must be positive.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.telegram.webhook_url {
            match reqwest::Url::parse(url_str) {
                Ok(url) if url.scheme() == "https" || url.scheme() == "http" => {}
                _ => anyhow::bail!("WEBHOOK_URL is set but not a valid http(s) URL: {}", url_str),
            }
        }
        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn uses_webhook(&self) -> bool {
        self.telegram.webhook_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BOT_TOKEN",
        "AUTHORIZED_USER_ID",
        "WEBHOOK_URL",
        "LISTEN_ADDR",
        "PORT",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "STYLES_FILE",
        "FETCH_TIMEOUT_SECS",
    ];

    fn clear() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear();
        env::set_var("BOT_TOKEN", "123:abc");
        env::set_var("AUTHORIZED_USER_ID", "42");

        let config = BotConfig::load(None).unwrap();
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.authorized_user_id, 42);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.telegram.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(config.styles_file.is_none());
        assert!(!config.uses_webhook());
        assert!(config.validate().is_ok());
        clear();
    }

    #[test]
    #[serial]
    fn test_token_override_and_webhook() {
        clear();
        env::set_var("BOT_TOKEN", "from-env");
        env::set_var("AUTHORIZED_USER_ID", " 7 ");
        env::set_var("WEBHOOK_URL", "https://bot.example.com");
        env::set_var("PORT", "9000");

        let config = BotConfig::load(Some("from-cli".to_string())).unwrap();
        assert_eq!(config.telegram.bot_token, "from-cli");
        assert_eq!(config.authorized_user_id, 7);
        assert_eq!(config.telegram.listen_addr, "0.0.0.0:9000");
        assert!(config.uses_webhook());
        assert!(config.validate().is_ok());
        clear();
    }

    #[test]
    #[serial]
    fn test_missing_or_bad_user_id() {
        clear();
        env::set_var("BOT_TOKEN", "123:abc");
        assert!(BotConfig::load(None).is_err());

        env::set_var("AUTHORIZED_USER_ID", "me");
        assert!(BotConfig::load(None).is_err());
        clear();
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_urls() {
        clear();
        env::set_var("BOT_TOKEN", "123:abc");
        env::set_var("AUTHORIZED_USER_ID", "1");
        env::set_var("TELEGRAM_API_URL", "not a url");
        assert!(BotConfig::load(None).unwrap().validate().is_err());

        env::remove_var("TELEGRAM_API_URL");
        env::set_var("WEBHOOK_URL", "ftp://example.com");
        assert!(BotConfig::load(None).unwrap().validate().is_err());
        clear();
    }
}
