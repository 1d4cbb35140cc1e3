//! Webhook mode: axum server receiving Telegram updates at `POST /{token}`, health check at `GET /`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::TelegramConfig;
use crate::queue::UpdateQueue;

#[derive(Clone)]
struct WebhookState {
    token: Arc<str>,
    bot: teloxide::Bot,
    queue: UpdateQueue,
}

/// Router with the update endpoint for `token` and the health check.
pub fn build_router(token: &str, bot: teloxide::Bot, queue: UpdateQueue) -> Router {
    let state = WebhookState {
        token: Arc::from(token),
        bot,
        queue,
    };
    Router::new()
        .route("/", get(health))
        .route("/{token}", post(receive_update))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn receive_update(
    State(state): State<WebhookState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Response {
    if token != *state.token {
        return StatusCode::NOT_FOUND.into_response();
    }
    let update: teloxide::types::Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "Malformed webhook payload");
            return (StatusCode::INTERNAL_SERVER_ERROR, "error").into_response();
        }
    };
    state.queue.push_telegram_update(&state.bot, &update);
    (StatusCode::OK, "ok").into_response()
}

/// Registers `{webhook_url}/{token}` with Telegram and serves until Ctrl-C.
pub async fn run_webhook(bot: teloxide::Bot, config: &TelegramConfig, queue: UpdateQueue) -> Result<()> {
    let endpoint = config
        .webhook_endpoint()
        .context("WEBHOOK_URL not set")?;
    let url = reqwest::Url::parse(&endpoint).context("Invalid WEBHOOK_URL")?;

    bot.delete_webhook()
        .await
        .context("Failed to delete previous webhook")?;
    bot.set_webhook(url)
        .await
        .context("Failed to set webhook")?;
    info!(
        webhook_base = config.webhook_url.as_deref().unwrap_or(""),
        "Webhook registered"
    );

    let router = build_router(&config.bot_token, bot, queue);
    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("webhook bind failed on {}", config.listen_addr))?;
    info!(listen_addr = %config.listen_addr, "Webhook server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("webhook server failed")?;
    Ok(())
}
