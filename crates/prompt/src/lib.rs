//! # Prompt
//!
//! Turns an article into an instruction for the text generator.
//!
//! ## Pieces
//!
//! - **Catalog**: [`StyleCatalog`] is a data table of styles (id, button label, template); the
//!   built-in table lives in `styles.toml`. [`Length`] maps short/medium/long to target characters.
//! - **Rendering**: [`build_instruction`] fills `{text}`, `{url}` and `{length}` into the style's
//!   template. Unknown styles render to an empty string.
//! - **Normalization**: [`strip_lone_markers`] cleans generated text, keeping only paired emphasis.
//! - **Messages**: [`ChatMessage`] is the role/content pair handed to the LLM client.

mod catalog;
mod emphasis;
mod render;

pub use catalog::{CatalogError, Length, Style, StyleCatalog, UnknownLength};
pub use emphasis::{strip_lone_markers, EMPHASIS_MARKER};
pub use render::{
    build_instruction, render, PLACEHOLDER_LENGTH, PLACEHOLDER_TEXT, PLACEHOLDER_URL,
};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// System instruction sent ahead of every rewrite request.
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "You are a professional assistant specializing in writing telegram posts.";
