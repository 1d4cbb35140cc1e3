//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`Handler`], [`Middleware`], inbound [`Update`]s,
//! outbound [`Keyboard`]s, and tracing initialization. Transport-agnostic; used by dbot-telegram and handler-chain.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use types::{
    CallbackQuery, Chat, Choice, Handler, HandlerResponse, Keyboard, Message, Middleware, Update,
    User,
};
