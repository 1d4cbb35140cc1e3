//! Outbound message sink.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute a recorder.

use crate::error::Result;
use crate::types::{Chat, Keyboard};
use async_trait::async_trait;

/// Abstraction for sending replies. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a text message with a set of mutually exclusive choices (inline buttons).
    async fn send_choices(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()>;
}
