//! The question-answering endpoint

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::AppState;
use super::types::ApiError;
use crate::domain::session::ChatTurn;

/// Form body for POST /get_answer
#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    pub msg: String,
    pub session_id: String,
}

/// Response body
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// POST /get_answer
///
/// Ensures the session exists, asks the orchestrator for an answer, then
/// appends the exchange to the session history. Failures map to structured
/// JSON errors so one bad request never takes the server down.
pub async fn get_answer(
    State(state): State<AppState>,
    Form(form): Form<AnswerForm>,
) -> Result<Json<AnswerResponse>, ApiError> {
    if form.msg.trim().is_empty() {
        return Err(ApiError::bad_request("msg must not be empty"));
    }

    if form.session_id.trim().is_empty() {
        return Err(ApiError::bad_request("session_id must not be empty"));
    }

    info!(session_id = %form.session_id, "Processing question");

    state.sessions.ensure(&form.session_id).await;

    let answer = state.chat.answer(&form.msg, &form.session_id).await?;

    state
        .sessions
        .append(
            &form.session_id,
            vec![ChatTurn::user(&form.msg), ChatTurn::assistant(&answer)],
        )
        .await;

    Ok(Json(AnswerResponse { answer }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::answer_cache::{AnswerCache, AnswerCacheConfig};
    use crate::domain::index::{ChunkRetriever, MockChunkRetriever, ScoredChunk};
    use crate::domain::llm::{LlmProvider, MockLlmProvider};
    use crate::domain::session::SessionStore;
    use crate::infrastructure::answer_cache::JsonFileAnswerCache;
    use crate::infrastructure::services::{ChatService, ChatServiceConfig};
    use crate::infrastructure::session::InMemorySessionStore;

    fn test_state(dir: &tempfile::TempDir, llm: MockLlmProvider) -> AppState {
        let retriever = Arc::new(
            MockChunkRetriever::new()
                .with_chunks(vec![ScoredChunk::new("returns within 30 days", 0.9)]),
        );
        let cache = Arc::new(
            JsonFileAnswerCache::open(
                dir.path().join("answer_cache.json"),
                AnswerCacheConfig::default(),
            )
            .unwrap(),
        );
        let sessions: Arc<InMemorySessionStore> = Arc::new(InMemorySessionStore::new());

        let chat = Arc::new(ChatService::new(
            retriever as Arc<dyn ChunkRetriever>,
            Arc::new(llm) as Arc<dyn LlmProvider>,
            cache as Arc<dyn AnswerCache>,
            Arc::clone(&sessions) as Arc<dyn SessionStore>,
            ChatServiceConfig {
                chat_model: "gpt-3.5-turbo".to_string(),
                temperature: 0.1,
                top_k: 10,
                system_prompt: "You answer from the manual.".to_string(),
                fallback_phrase: "not found".to_string(),
            },
        ));

        AppState::new(chat, sessions)
    }

    #[tokio::test]
    async fn test_answer_appends_history() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir, MockLlmProvider::new("mock").with_reply("30 days"));

        let response = get_answer(
            State(state.clone()),
            Form(AnswerForm {
                msg: "What is the return policy?".to_string(),
                session_id: "alice - 1".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.0.answer, "30 days");

        let history = state.sessions.history("alice - 1").await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text, "What is the return policy?");
        assert_eq!(history[1].text, "30 days");
    }

    #[tokio::test]
    async fn test_empty_msg_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir, MockLlmProvider::new("mock").with_reply("unused"));

        let result = get_answer(
            State(state),
            Form(AnswerForm {
                msg: "   ".to_string(),
                session_id: "alice - 1".to_string(),
            }),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_requests_on_one_session_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir, MockLlmProvider::new("mock").with_reply("30 days"));

        let first = {
            let state = state.clone();
            tokio::spawn(async move {
                get_answer(
                    State(state),
                    Form(AnswerForm {
                        msg: "What is the return policy?".to_string(),
                        session_id: "shared - 1".to_string(),
                    }),
                )
                .await
                .unwrap()
            })
        };

        let second = {
            let state = state.clone();
            tokio::spawn(async move {
                get_answer(
                    State(state),
                    Form(AnswerForm {
                        msg: "What does the warranty cover?".to_string(),
                        session_id: "shared - 1".to_string(),
                    }),
                )
                .await
                .unwrap()
            })
        };

        first.await.unwrap();
        second.await.unwrap();

        // Two user turns and two bot turns survive, none lost
        let history = state.sessions.history("shared - 1").await;
        assert_eq!(history.len(), 4);
    }
}
