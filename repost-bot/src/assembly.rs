//! Assembly: builds the style catalog, the handler chain, and runs the chosen transport.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use article_fetcher::{ArticleFetcher, HttpArticleFetcher};
use dbot_core::Bot as CoreBot;
use dbot_telegram::{run_polling, run_webhook, run_worker, update_queue, TelegramBotAdapter};
use handler_chain::HandlerChain;
use llm_client::{EnvLlmConfig, LlmClient, LlmConfig, OpenAILlmClient};
use middleware::{AuthMiddleware, LoggingMiddleware};
use openai_client::mask_token;
use prompt::StyleCatalog;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::conversation::ConversationHandler;
use crate::store::{InMemorySessionStore, SessionStore};

/// Built-in catalog, or the one in `styles_file` when given.
pub fn load_catalog(styles_file: Option<&str>) -> Result<StyleCatalog> {
    match styles_file {
        Some(path) => {
            let catalog = StyleCatalog::from_path(path)
                .with_context(|| format!("Failed to load STYLES_FILE {}", path))?;
            info!(path = %path, styles = catalog.len(), "Style catalog loaded from file");
            Ok(catalog)
        }
        None => StyleCatalog::builtin().context("Built-in style catalog is invalid"),
    }
}

/// Catalog listing for the `styles` command: `id  label`, one per line.
pub fn describe_catalog(catalog: &StyleCatalog) -> String {
    catalog
        .iter()
        .map(|s| format!("{}\t{}", s.id, s.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Chain: logging → single-user auth → conversation.
pub fn build_chain(
    authorized_user_id: i64,
    bot: Arc<dyn CoreBot>,
    store: Arc<dyn SessionStore>,
    catalog: Arc<StyleCatalog>,
    fetcher: Arc<dyn ArticleFetcher>,
    llm: Arc<dyn LlmClient>,
) -> HandlerChain {
    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_middleware(Arc::new(AuthMiddleware::new(authorized_user_id, bot.clone())))
        .add_handler(Arc::new(ConversationHandler::new(
            bot, store, catalog, fetcher, llm,
        )))
}

fn build_llm_client() -> Result<Arc<dyn LlmClient>> {
    let llm_cfg = EnvLlmConfig::from_env()?;
    info!(
        base_url = %llm_cfg.base_url(),
        model = %llm_cfg.model(),
        api_key = %mask_token(llm_cfg.api_key()),
        max_tokens = llm_cfg.max_tokens(),
        temperature = llm_cfg.temperature(),
        timeout_secs = llm_cfg.timeout_secs(),
        "LLM client configured"
    );
    match llm_cfg.system_prompt() {
        Some(s) => {
            let prefix: String = s.chars().take(50).collect();
            info!(len = s.len(), prefix = %prefix, "Using custom LLM_SYSTEM_PROMPT from env");
        }
        None => info!("No LLM_SYSTEM_PROMPT in env; using default"),
    }
    Ok(Arc::new(OpenAILlmClient::from_config(&llm_cfg)))
}

/// Runs the bot until the transport stops: webhook when configured, otherwise long polling.
pub async fn run_bot(config: BotConfig, force_polling: bool) -> Result<()> {
    config.validate()?;
    dbot_core::init_tracing(&config.log_file)?;

    info!(
        authorized_user_id = config.authorized_user_id,
        bot_token = %mask_token(&config.telegram.bot_token),
        "Starting repost bot"
    );

    let catalog = Arc::new(load_catalog(config.styles_file.as_deref())?);
    info!(styles = catalog.len(), "Style catalog ready");

    let llm = build_llm_client()?;
    let fetcher: Arc<dyn ArticleFetcher> = Arc::new(
        HttpArticleFetcher::new(Duration::from_secs(config.fetch_timeout_secs))
            .context("Failed to create HTTP client for article fetching")?,
    );
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let teloxide_bot = config.telegram.build_bot();
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let chain = build_chain(
        config.authorized_user_id,
        bot_adapter,
        store,
        catalog,
        fetcher,
        llm,
    );

    let (queue, rx) = update_queue();
    let worker = tokio::spawn(run_worker(rx, chain));

    if config.uses_webhook() && !force_polling {
        run_webhook(teloxide_bot, &config.telegram, queue).await?;
    } else {
        if config.uses_webhook() {
            warn!("WEBHOOK_URL is set but --polling was given; using long polling");
        }
        run_polling(teloxide_bot, queue).await;
    }

    worker.await.context("update worker panicked")?;
    info!("Repost bot stopped");
    Ok(())
}
