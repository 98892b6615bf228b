//! In-memory session history store with per-session locks.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::session::{ChatTurn, SessionHistory, SessionStore};

/// Process-wide session map.
///
/// The outer lock only guards the map itself; each session's log has its own
/// mutex, so check-or-create plus append for one session cannot interleave
/// with another request on the same session, and distinct sessions never
/// contend.
///
/// History lives for the process lifetime only; nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionHistory>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn session(&self, session_id: &str) -> Arc<Mutex<SessionHistory>> {
        if let Some(history) = self.sessions.read().await.get(session_id) {
            return Arc::clone(history);
        }

        let mut sessions = self.sessions.write().await;

        // Re-check under the write lock so a racing creator wins exactly once
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(SessionHistory::new()))),
        )
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn ensure(&self, session_id: &str) {
        self.session(session_id).await;
    }

    async fn history(&self, session_id: &str) -> Vec<ChatTurn> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(session_id).map(Arc::clone)
        };

        match session {
            Some(history) => history.lock().await.turns().to_vec(),
            None => Vec::new(),
        }
    }

    async fn append(&self, session_id: &str, turns: Vec<ChatTurn>) {
        let session = self.session(session_id).await;
        let mut history = session.lock().await;
        history.extend(turns);
    }
}
