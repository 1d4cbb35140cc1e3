//! Long polling: teloxide Dispatcher feeding the update queue.

use teloxide::prelude::*;
use tracing::{debug, info, instrument};

use crate::queue::UpdateQueue;

/// Polls Telegram until Ctrl-C; messages and callback presses go to `queue`.
#[instrument(skip(bot, queue))]
pub async fn run_polling(bot: teloxide::Bot, queue: UpdateQueue) {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity confirmed");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(
            |msg: Message, queue: UpdateQueue| async move {
                queue.push_message(&msg);
                respond(())
            },
        ))
        .branch(Update::filter_callback_query().endpoint(
            |bot: Bot, query: CallbackQuery, queue: UpdateQueue| async move {
                queue.push_callback(&bot, &query);
                respond(())
            },
        ));

    info!("Starting long polling");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![queue])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Unsupported update kind dropped");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
