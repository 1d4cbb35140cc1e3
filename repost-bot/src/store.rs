//! Session storage keyed by user id.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::session::Session;

/// Session storage. Last write wins per user; no eviction.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Option<Session>;

    /// Creates or replaces the user's session.
    async fn put(&self, user_id: i64, session: Session);

    async fn len(&self) -> usize;
}

/// Process-lifetime store; a restart forgets every session.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: i64) -> Option<Session> {
        self.sessions.read().await.get(&user_id).cloned()
    }

    async fn put(&self, user_id: i64, session: Session) {
        self.sessions.write().await.insert(user_id, session);
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
