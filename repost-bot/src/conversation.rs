//! Conversation handler: link → style → length → rewritten article.
//!
//! Runs last in the handler chain, after authorization. Every event is decoded into an [`Event`],
//! checked against the user's stored [`Session`], and answered; failures become replies.

use std::sync::Arc;

use article_fetcher::ArticleFetcher;
use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, Choice, Handler, HandlerResponse, Keyboard, Result, Update};
use llm_client::{GenerationError, LlmClient};
use prompt::{build_instruction, strip_lone_markers, Length, StyleCatalog, EMPHASIS_MARKER};
use tracing::{debug, info, instrument, warn};

use crate::error::RepostError;
use crate::event::{length_payload, style_payload, Event};
use crate::session::Session;
use crate::store::SessionStore;
use crate::texts;

const LOG_PREVIEW_CHARS: usize = 80;

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Drives one user's request through the style and length choices, then fetches, rewrites and replies.
///
/// **External interactions:** Bot (replies and keyboards), SessionStore, ArticleFetcher, LlmClient.
#[derive(Clone)]
pub struct ConversationHandler {
    bot: Arc<dyn CoreBot>,
    store: Arc<dyn SessionStore>,
    catalog: Arc<StyleCatalog>,
    fetcher: Arc<dyn ArticleFetcher>,
    llm: Arc<dyn LlmClient>,
}

impl ConversationHandler {
    pub fn new(
        bot: Arc<dyn CoreBot>,
        store: Arc<dyn SessionStore>,
        catalog: Arc<StyleCatalog>,
        fetcher: Arc<dyn ArticleFetcher>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            bot,
            store,
            catalog,
            fetcher,
            llm,
        }
    }

    /// One button per style, one per row, in catalog order.
    pub fn style_keyboard(&self) -> Keyboard {
        Keyboard::column(
            self.catalog
                .iter()
                .map(|s| Choice::new(&s.label, style_payload(&s.id))),
        )
    }

    /// The three lengths in a single row.
    pub fn length_keyboard() -> Keyboard {
        Keyboard::row(
            Length::ALL
                .into_iter()
                .map(|l| Choice::new(l.label(), length_payload(l))),
        )
    }

    async fn reject(&self, chat: &Chat, err: RepostError) -> Result<HandlerResponse> {
        warn!(chat_id = chat.id, error = %err, "Event rejected");
        self.bot.send_message(chat, &err.user_message()).await?;
        Ok(HandlerResponse::Stop)
    }

    async fn on_link(&self, user_id: i64, chat: &Chat, url: String) -> Result<HandlerResponse> {
        info!(user_id, url = %url, "Link received, new session");
        self.store.put(user_id, Session::start(url)).await;
        self.bot
            .send_choices(chat, texts::CHOOSE_STYLE, &self.style_keyboard())
            .await?;
        Ok(HandlerResponse::Stop)
    }

    async fn on_style(&self, user_id: i64, chat: &Chat, style: String) -> Result<HandlerResponse> {
        let Some(session) = self.store.get(user_id).await else {
            return self
                .reject(chat, RepostError::Sequence("style chosen without a link"))
                .await;
        };
        if !self.catalog.contains(&style) {
            return self.reject(chat, RepostError::UnknownStyle(style)).await;
        }
        info!(user_id, style = %style, url = %session.url(), "Style chosen");
        self.store.put(user_id, session.with_style(style)).await;
        self.bot
            .send_choices(chat, texts::CHOOSE_LENGTH, &Self::length_keyboard())
            .await?;
        Ok(HandlerResponse::Stop)
    }

    async fn on_length(&self, user_id: i64, chat: &Chat, length: Length) -> Result<HandlerResponse> {
        let Some(session) = self.store.get(user_id).await else {
            return self
                .reject(chat, RepostError::Sequence("length chosen without a link"))
                .await;
        };
        let session = match session.with_length(length) {
            Ok(s) => s,
            Err(e) => return self.reject(chat, e).await,
        };
        self.store.put(user_id, session.clone()).await;
        self.bot.send_message(chat, texts::WORKING).await?;

        match self.produce(&session).await {
            Ok(text) => {
                self.bot.send_message(chat, &text).await?;
                Ok(HandlerResponse::Reply(text))
            }
            // The session stays as is so the same choice can be retried.
            Err(e) => self.reject(chat, e).await,
        }
    }

    /// Fetches the article, renders the instruction, generates and normalizes the post.
    #[instrument(skip(self, session), fields(url = %session.url(), style = tracing::field::Empty, length = tracing::field::Empty))]
    async fn produce(&self, session: &Session) -> std::result::Result<String, RepostError> {
        let Session::Complete { url, style, length } = session else {
            return Err(RepostError::Sequence("generation requested before all choices"));
        };
        tracing::Span::current()
            .record("style", style.as_str())
            .record("length", length.id());

        let article = self.fetcher.fetch(url).await?;
        info!(article_len = article.chars().count(), "Article fetched");

        let instruction = build_instruction(&self.catalog, &article, url, style, *length);
        if instruction.is_empty() {
            return Err(RepostError::EmptyInstruction(style.clone()));
        }
        debug!(instruction_prefix = %preview(&instruction), "Instruction built");

        let generated = self.llm.generate(&instruction).await?;
        let text = strip_lone_markers(&generated, EMPHASIS_MARKER);
        if text.trim().is_empty() {
            return Err(GenerationError::Empty.into());
        }
        info!(
            result_len = text.chars().count(),
            result_prefix = %preview(&text),
            "Post generated"
        );
        Ok(text)
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    #[instrument(skip(self, update), fields(user_id = update.user().id, chat_id = update.chat().id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let user_id = update.user().id;
        let chat = update.chat();
        let event = Event::decode(update);
        debug!(event = event.name(), "Event decoded");

        match event {
            Event::Link(url) => self.on_link(user_id, chat, url).await,
            Event::Text(_) => {
                self.bot.send_message(chat, texts::SEND_LINK).await?;
                Ok(HandlerResponse::Stop)
            }
            Event::StyleChosen(style) => self.on_style(user_id, chat, style).await,
            Event::LengthChosen(length) => self.on_length(user_id, chat, length).await,
            Event::UnknownChoice(data) => self.reject(chat, RepostError::UnknownChoice(data)).await,
        }
    }
}
