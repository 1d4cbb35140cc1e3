//! Single-worker update queue: transports push, one task drains into the handler chain.

use dbot_core::Update;
use handler_chain::HandlerChain;
use teloxide::prelude::Requester;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Sending half of the queue; cheap to clone into transport handlers.
#[derive(Clone)]
pub struct UpdateQueue {
    tx: mpsc::UnboundedSender<Update>,
}

pub type UpdateReceiver = mpsc::UnboundedReceiver<Update>;

/// Creates the queue shared by the transport and [`run_worker`].
pub fn update_queue() -> (UpdateQueue, UpdateReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UpdateQueue { tx }, rx)
}

impl UpdateQueue {
    /// Enqueues a core update. Returns false once the worker has stopped.
    pub fn push(&self, update: Update) -> bool {
        match self.tx.send(update) {
            Ok(()) => true,
            Err(_) => {
                warn!("update worker stopped, dropping update");
                false
            }
        }
    }

    pub fn push_message(&self, msg: &teloxide::types::Message) -> bool {
        let core = TelegramMessageWrapper(msg).to_core();
        match msg.text() {
            Some(text) => info!(
                user_id = core.user.id,
                chat_id = core.chat.id,
                message_content = %text,
                "Received message"
            ),
            None => info!(
                user_id = core.user.id,
                chat_id = core.chat.id,
                "Received non-text message"
            ),
        }
        self.push(Update::Message(core))
    }

    /// Acknowledges the press in the background, then enqueues it.
    pub fn push_callback(&self, bot: &teloxide::Bot, query: &teloxide::types::CallbackQuery) -> bool {
        let bot = bot.clone();
        let id = query.id.clone();
        tokio::spawn(async move {
            if let Err(e) = bot.answer_callback_query(id).await {
                warn!(error = %e, "Failed to answer callback query");
            }
        });

        let core = TelegramCallbackWrapper(query).to_core();
        info!(
            user_id = core.user.id,
            chat_id = core.chat.id,
            data = %core.data,
            "Received callback"
        );
        self.push(Update::Callback(core))
    }

    /// Routes a raw Telegram update; kinds other than messages and callbacks are dropped.
    pub fn push_telegram_update(&self, bot: &teloxide::Bot, update: &teloxide::types::Update) -> bool {
        use teloxide::types::UpdateKind;
        match &update.kind {
            UpdateKind::Message(msg) => self.push_message(msg),
            UpdateKind::CallbackQuery(query) => self.push_callback(bot, query),
            _ => {
                debug!(update_id = ?update.id, "Unsupported update kind dropped");
                false
            }
        }
    }
}

/// Drains the queue one update at a time until every sender is gone.
pub async fn run_worker(mut rx: UpdateReceiver, chain: HandlerChain) {
    info!("update worker started");
    while let Some(update) = rx.recv().await {
        let user_id = update.user().id;
        debug!(user_id, kind = update.kind(), "step: processing update (handler chain started)");
        if let Err(e) = chain.handle(&update).await {
            error!(error = %e, user_id, "Handler chain failed");
        }
    }
    info!("update worker stopped");
}
