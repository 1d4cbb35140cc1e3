//! # dbot-telegram
//!
//! Telegram transport: adapters, [`dbot_core::Bot`] implementation with inline keyboards, config,
//! a single-worker update queue, and two intakes (long polling, axum webhook).
//! Handles only Telegram connectivity and handler-chain execution; no conversation logic.

mod adapters;
mod bot_adapter;
mod config;
mod queue;
mod runner;
mod webhook;

pub use adapters::{
    TelegramCallbackWrapper, TelegramChatWrapper, TelegramMessageWrapper, TelegramUserWrapper,
};
pub use bot_adapter::{inline_keyboard, split_message, TelegramBotAdapter, MAX_MESSAGE_CHARS};
pub use config::{TelegramConfig, DEFAULT_PORT};
pub use queue::{run_worker, update_queue, UpdateQueue, UpdateReceiver};
pub use runner::run_polling;
pub use webhook::{build_router, run_webhook};
