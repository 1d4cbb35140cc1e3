//! Core types: user, chat, inbound updates, outbound keyboards, handler response, and Handler/Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// User with only an id; names unknown.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// A text message sent by a user. Non-text messages carry empty `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A choice (inline button) press. `data` is the payload attached to the pressed [`Choice`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub data: String,
    pub created_at: DateTime<Utc>,
}

/// Inbound event delivered by a transport, decoded once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Update {
    Message(Message),
    Callback(CallbackQuery),
}

impl Update {
    pub fn user(&self) -> &User {
        match self {
            Update::Message(m) => &m.user,
            Update::Callback(c) => &c.user,
        }
    }

    pub fn chat(&self) -> &Chat {
        match self {
            Update::Message(m) => &m.chat,
            Update::Callback(c) => &c.chat,
        }
    }

    /// Message text or callback payload.
    pub fn content(&self) -> &str {
        match self {
            Update::Message(m) => &m.content,
            Update::Callback(c) => &c.data,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Update::Message(_) => "message",
            Update::Callback(_) => "callback",
        }
    }
}

/// One labeled option; `data` comes back as [`CallbackQuery::data`] when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Set of mutually exclusive choices attached to an outgoing message, laid out in rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Choice>>,
}

impl Keyboard {
    /// One choice per row, in the given order.
    pub fn column(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            rows: choices.into_iter().map(|c| vec![c]).collect(),
        }
    }

    /// All choices in a single row.
    pub fn row(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            rows: vec![choices.into_iter().collect()],
        }
    }

    /// Iterates all choices row by row.
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.rows.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.choices().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so middleware can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the final reply text.
    Reply(String),
}

/// Processes an update. Chain runs middleware before → handlers until Stop/Reply → middleware after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes the update. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _update: &Update) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
}

/// Wraps the handlers: `before` may stop the chain (return false), `after` sees the final response.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, update: &Update) -> crate::error::Result<bool>;

    async fn after(
        &self,
        update: &Update,
        response: &HandlerResponse,
    ) -> crate::error::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat() -> Chat {
        Chat {
            id: 7,
            chat_type: "private".to_string(),
        }
    }

    #[test]
    fn test_keyboard_column_puts_each_choice_on_own_row() {
        let kb = Keyboard::column(vec![Choice::new("a", "x:a"), Choice::new("b", "x:b")]);
        assert_eq!(kb.rows.len(), 2);
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.rows[1][0].data, "x:b");
    }

    #[test]
    fn test_keyboard_row_keeps_order() {
        let kb = Keyboard::row(vec![
            Choice::new("1", "n:1"),
            Choice::new("2", "n:2"),
            Choice::new("3", "n:3"),
        ]);
        assert_eq!(kb.rows.len(), 1);
        let labels: Vec<&str> = kb.choices().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        assert!(Keyboard::default().is_empty());
    }

    #[test]
    fn test_update_accessors() {
        let cb = Update::Callback(CallbackQuery {
            id: "q1".to_string(),
            user: User::with_id(42),
            chat: chat(),
            data: "style:style1".to_string(),
            created_at: Utc::now(),
        });
        assert_eq!(cb.user().id, 42);
        assert_eq!(cb.chat().id, 7);
        assert_eq!(cb.content(), "style:style1");
        assert_eq!(cb.kind(), "callback");
    }
}
