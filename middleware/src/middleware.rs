use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Bot, HandlerResponse, Middleware, Result, Update};
use tracing::{debug, error, info, instrument, warn};

/// Reply sent to unauthorized users who write to the bot directly.
pub const DEFAULT_REFUSAL_MESSAGE: &str =
    "Извините, этот бот предназначен только для авторизованных пользователей.";

pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        info!(
            user_id = update.user().id,
            chat_id = update.chat().id,
            username = %update.user().username.as_deref().unwrap_or("unknown"),
            kind = update.kind(),
            content = %update.content(),
            "Received update"
        );
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        debug!(
            user_id = update.user().id,
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}

/// Stops the chain for everyone except the authorized user.
///
/// Direct messages from others get a fixed refusal; choice presses from others are dropped
/// silently since a button press has no natural place for a refusal. Never mutates anything else.
pub struct AuthMiddleware {
    authorized_user_id: i64,
    bot: Arc<dyn Bot>,
}

impl AuthMiddleware {
    pub fn new(authorized_user_id: i64, bot: Arc<dyn Bot>) -> Self {
        Self {
            authorized_user_id,
            bot,
        }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user_id = update.user().id;
        if user_id == self.authorized_user_id {
            debug!(user_id, "User authorized");
            return Ok(true);
        }

        warn!(user_id, kind = update.kind(), "Unauthorized access attempt");
        if let Update::Message(message) = update {
            if let Err(e) = self.bot.send_message(&message.chat, DEFAULT_REFUSAL_MESSAGE).await {
                error!(error = %e, user_id, "Failed to send refusal");
            }
        }
        Ok(false)
    }

    async fn after(&self, _update: &Update, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
