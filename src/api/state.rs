//! Application state shared by request handlers

use std::sync::Arc;

use crate::domain::session::SessionStore;
use crate::infrastructure::services::ChatService;

/// Shared services, constructed once at startup and cloned per request.
///
/// All state is held here explicitly; there are no process globals.
#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(chat: Arc<ChatService>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { chat, sessions }
    }
}
