//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{CallbackQuery, Chat, Message, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Chat for conversion to core [`Chat`].
pub struct TelegramChatWrapper<'a>(pub &'a teloxide::types::Chat);

impl<'a> TelegramChatWrapper<'a> {
    pub fn to_core(&self) -> Chat {
        let chat_type = if self.0.is_private() {
            "private"
        } else if self.0.is_group() || self.0.is_supergroup() {
            "group"
        } else {
            "channel"
        };
        Chat {
            id: self.0.id.0,
            chat_type: chat_type.to_string(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`]. Non-text messages get empty content.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    pub fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User::with_id(0)),
            chat: TelegramChatWrapper(&self.0.chat).to_core(),
            content: self.0.text().unwrap_or("").to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackQuery`].
///
/// Presses on messages the bot can no longer see fall back to the presser's private chat.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    pub fn to_core(&self) -> CallbackQuery {
        let user = TelegramUserWrapper(&self.0.from).to_core();
        let chat = self
            .0
            .message
            .as_ref()
            .map(|m| TelegramChatWrapper(m.chat()).to_core())
            .unwrap_or_else(|| Chat {
                id: user.id,
                chat_type: "private".to_string(),
            });
        CallbackQuery {
            id: self.0.id.to_string(),
            user,
            chat,
            data: self.0.data.clone().unwrap_or_default(),
            created_at: chrono::Utc::now(),
        }
    }
}
