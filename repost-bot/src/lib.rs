//! # repost_bot
//!
//! Single-user Telegram bot: the user sends a link, picks a style and a length, and gets the article
//! rewritten as a post.
//!
//! - [`event`]: inbound updates decoded into [`Event`]s.
//! - [`session`] / [`store`]: per-user [`Session`] behind the [`SessionStore`] trait.
//! - [`conversation`]: [`ConversationHandler`], the state machine driving fetch and generation.
//! - [`assembly`]: wiring and the `run` entry point.

pub mod assembly;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod event;
pub mod session;
pub mod store;
pub mod texts;

pub use assembly::{build_chain, describe_catalog, load_catalog, run_bot};
pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use conversation::ConversationHandler;
pub use error::RepostError;
pub use event::{length_payload, style_payload, Event};
pub use session::Session;
pub use store::{InMemorySessionStore, SessionStore};
