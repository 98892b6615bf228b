//! Chat orchestration: cache lookup, retrieval, model invocation, cache
//! write-back.

use std::sync::Arc;

use tracing::debug;

use crate::domain::answer_cache::AnswerCache;
use crate::domain::index::ChunkRetriever;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::session::{SessionStore, Speaker};
use crate::domain::DomainError;

/// Settings for the chat orchestrator
#[derive(Debug, Clone)]
pub struct ChatServiceConfig {
    pub chat_model: String,
    pub temperature: f32,
    /// Number of chunks retrieved per query
    pub top_k: usize,
    pub system_prompt: String,
    /// Reply meaning "not found in the manual"; such answers are never cached
    pub fallback_phrase: String,
}

/// Output of the retrieval/generation step.
///
/// `found` is the structured signal for "the answer is in the manual"; the
/// comparison against the fallback phrase happens here and nowhere else.
#[derive(Debug, Clone)]
pub struct GeneratedAnswer {
    pub text: String,
    pub found: bool,
}

/// Answers queries by checking the answer cache, then retrieving context and
/// invoking the chat model.
#[derive(Debug)]
pub struct ChatService {
    retriever: Arc<dyn ChunkRetriever>,
    llm: Arc<dyn LlmProvider>,
    cache: Arc<dyn AnswerCache>,
    sessions: Arc<dyn SessionStore>,
    config: ChatServiceConfig,
}

impl ChatService {
    pub fn new(
        retriever: Arc<dyn ChunkRetriever>,
        llm: Arc<dyn LlmProvider>,
        cache: Arc<dyn AnswerCache>,
        sessions: Arc<dyn SessionStore>,
        config: ChatServiceConfig,
    ) -> Self {
        Self {
            retriever,
            llm,
            cache,
            sessions,
            config,
        }
    }

    /// Answer a query for a session.
    ///
    /// A cache hit skips retrieval and the model call entirely. On a miss the
    /// generated answer is cached unless the model reported it was not found
    /// in the manual. The caller appends history either way.
    pub async fn answer(&self, query: &str, session_id: &str) -> Result<String, DomainError> {
        if let Some(cached) = self.cache.lookup(query).await? {
            debug!(session_id, "Serving answer from cache");
            return Ok(cached);
        }

        let generated = self
            .generate(query, session_id)
            .await
            .map_err(|e| DomainError::internal(format!("failed to obtain chatbot answer: {e}")))?;

        if generated.found {
            // Cache write failures are fatal: silently losing a computed
            // answer is worse than failing the request.
            self.cache.store(query, &generated.text).await?;
        } else {
            debug!(session_id, "Answer not found in manual, skipping cache");
        }

        Ok(generated.text)
    }

    /// Retrieve context and invoke the chat model
    async fn generate(
        &self,
        query: &str,
        session_id: &str,
    ) -> Result<GeneratedAnswer, DomainError> {
        let chunks = self.retriever.retrieve(query, self.config.top_k).await?;

        debug!(
            session_id,
            retrieved = chunks.len(),
            "Retrieved context chunks"
        );

        let context = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let history = self.sessions.history(session_id).await;

        let mut builder = LlmRequest::builder()
            .system(self.config.system_prompt.clone())
            .assistant(context);

        for turn in history {
            builder = match turn.speaker {
                Speaker::User => builder.user(turn.text),
                Speaker::Assistant => builder.assistant(turn.text),
            };
        }

        let request = builder
            .user(query)
            .temperature(self.config.temperature)
            .build();

        let response = self.llm.chat(&self.config.chat_model, request).await?;
        let text = response.content().to_string();
        let found = text != self.config.fallback_phrase;

        Ok(GeneratedAnswer { text, found })
    }
}
