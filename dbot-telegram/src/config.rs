//! Telegram connection settings: token, API URL, and webhook endpoint.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL, WEBHOOK_URL, LISTEN_ADDR / PORT.

use anyhow::{Context, Result};
use std::env;
use tracing::error;

pub const DEFAULT_PORT: u16 = 8080;

/// Minimal Telegram transport configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// Public base URL; when set the bot receives updates by webhook instead of polling.
    pub webhook_url: Option<String>,
    /// Address the webhook server binds to.
    pub listen_addr: String,
}

fn default_listen_addr() -> String {
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    format!("0.0.0.0:{}", port)
}

impl TelegramConfig {
    /// Loads from environment: BOT_TOKEN required unless `token` is given.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let webhook_url = env::var("WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| default_listen_addr());
        Ok(Self {
            bot_token,
            telegram_api_url,
            webhook_url,
            listen_addr,
        })
    }

    /// Uses the given token; everything else at defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            webhook_url: None,
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
        }
    }

    /// Full webhook address registered with Telegram: `{webhook_url}/{token}`.
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), self.bot_token))
    }

    /// Builds the teloxide bot, pointing it at TELEGRAM_API_URL when valid.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}
