//! Test doubles for the conversation: a recording [`Bot`], a scripted [`ArticleFetcher`], a scripted [`LlmClient`].

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use article_fetcher::{ArticleFetcher, FetchError};
use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, CallbackQuery, Chat, Keyboard, Message, Result, Update, User};
use llm_client::{GenerationError, LlmClient};
use prompt::{ChatMessage, StyleCatalog};
use repost_bot::{build_chain, InMemorySessionStore, SessionStore};
use handler_chain::HandlerChain;

pub const OWNER_ID: i64 = 42;
pub const CHAT_ID: i64 = 4200;

/// One outgoing message as the user would see it.
#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
}

impl RecordingBot {
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: None,
        });
        Ok(())
    }

    async fn send_choices(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard: Some(keyboard.clone()),
        });
        Ok(())
    }
}

/// Returns a fixed article or fails with a network error.
pub struct MockFetcher {
    pub article: Option<String>,
    pub calls: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn ok(article: &str) -> Self {
        Self {
            article: Some(article.to_string()),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            article: None,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        match &self.article {
            Some(a) => Ok(a.clone()),
            None => Err(FetchError::Network("connection refused".to_string())),
        }
    }
}

/// Returns a fixed completion (or times out) and records the instructions it received.
pub struct MockLlm {
    pub reply: Option<String>,
    pub instructions: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            instructions: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            instructions: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.instructions.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> std::result::Result<String, GenerationError> {
        let content = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.instructions.lock().unwrap().push(content);
        self.reply.clone().ok_or(GenerationError::Timeout(120))
    }
}

/// Everything a scenario needs, wired through the real handler chain.
pub struct Harness {
    pub bot: Arc<RecordingBot>,
    pub store: Arc<InMemorySessionStore>,
    pub fetcher: Arc<MockFetcher>,
    pub llm: Arc<MockLlm>,
    pub chain: HandlerChain,
}

impl Harness {
    pub fn new(fetcher: MockFetcher, llm: MockLlm) -> Self {
        let bot = Arc::new(RecordingBot::default());
        let store = Arc::new(InMemorySessionStore::new());
        let fetcher = Arc::new(fetcher);
        let llm = Arc::new(llm);
        let catalog = Arc::new(StyleCatalog::builtin().unwrap());
        let chain = build_chain(
            OWNER_ID,
            bot.clone(),
            store.clone() as Arc<dyn SessionStore>,
            catalog,
            fetcher.clone(),
            llm.clone(),
        );
        Self {
            bot,
            store,
            fetcher,
            llm,
            chain,
        }
    }

    pub async fn send(&self, update: Update) {
        self.chain.handle(&update).await.unwrap();
    }
}

fn chat() -> Chat {
    Chat {
        id: CHAT_ID,
        chat_type: "private".to_string(),
    }
}

pub fn text_from(user_id: i64, text: &str) -> Update {
    Update::Message(Message {
        id: "1".to_string(),
        user: User::with_id(user_id),
        chat: Chat {
            id: if user_id == OWNER_ID { CHAT_ID } else { user_id },
            chat_type: "private".to_string(),
        },
        content: text.to_string(),
        created_at: Utc::now(),
    })
}

pub fn text(text: &str) -> Update {
    text_from(OWNER_ID, text)
}

pub fn choice_from(user_id: i64, data: &str) -> Update {
    Update::Callback(CallbackQuery {
        id: "cb".to_string(),
        user: User::with_id(user_id),
        chat: chat(),
        data: data.to_string(),
        created_at: Utc::now(),
    })
}

pub fn choice(data: &str) -> Update {
    choice_from(OWNER_ID, data)
}
