//! Retrieval-augmented question answering over a PDF manual.
//!
//! The service extracts text from a manual, builds a persisted vector index
//! over token-bounded chunks, and answers queries by retrieving the most
//! similar chunks and forwarding them plus the session's conversation history
//! to a hosted chat model. A fuzzy answer cache short-circuits repeated or
//! near-duplicate questions.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::path::Path;
use std::sync::Arc;

use api::state::AppState;
use domain::answer_cache::{AnswerCache, AnswerCacheConfig};
use domain::embedding::EmbeddingProvider;
use domain::ingestion::ChunkingConfig;
use domain::llm::LlmProvider;
use domain::session::SessionStore;
use infrastructure::answer_cache::JsonFileAnswerCache;
use infrastructure::embedding::OpenAiEmbeddingProvider;
use infrastructure::extract::PdfTextExtractor;
use infrastructure::index::{EmbeddingRetriever, FlatFileIndex};
use infrastructure::ingestion::TokenTextChunker;
use infrastructure::llm::{HttpClient, OpenAiProvider};
use infrastructure::services::{ChatService, ChatServiceConfig, IngestionService};
use infrastructure::session::InMemorySessionStore;

/// Build the shared application state: load the persisted index and cache,
/// wire up the providers and the orchestrator.
///
/// Fails with a distinct missing-index error if no index has been built yet.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let api_key = require_api_key(config)?;

    let index = Arc::new(FlatFileIndex::load(Path::new(&config.index.path))?);

    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddingProvider::with_base_url(
        HttpClient::new(),
        api_key.clone(),
        config.openai.base_url.clone(),
    ));

    let llm: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::with_base_url(
        HttpClient::new(),
        api_key,
        config.openai.base_url.clone(),
    ));

    let retriever = Arc::new(EmbeddingRetriever::new(index, embeddings));

    let cache: Arc<dyn AnswerCache> = Arc::new(JsonFileAnswerCache::open(
        &config.cache.path,
        AnswerCacheConfig::new().with_similarity_threshold(config.cache.similarity_threshold),
    )?);

    let sessions: Arc<InMemorySessionStore> = Arc::new(InMemorySessionStore::new());

    let chat = Arc::new(ChatService::new(
        retriever,
        llm,
        cache,
        Arc::clone(&sessions) as Arc<dyn SessionStore>,
        ChatServiceConfig {
            chat_model: config.openai.chat_model.clone(),
            temperature: config.openai.temperature,
            top_k: config.index.top_k,
            system_prompt: config.chat.system_prompt.clone(),
            fallback_phrase: config.chat.fallback_phrase.clone(),
        },
    ));

    Ok(AppState::new(chat, sessions))
}

/// Build the ingestion pipeline: PDF extraction, token chunking, embeddings,
/// flat-file persistence.
pub fn create_ingestion_service(config: &AppConfig) -> anyhow::Result<IngestionService> {
    let api_key = require_api_key(config)?;

    let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiEmbeddingProvider::with_base_url(
        HttpClient::new(),
        api_key,
        config.openai.base_url.clone(),
    ));

    Ok(IngestionService::new(
        Arc::new(PdfTextExtractor::new()),
        Arc::new(TokenTextChunker::new()?),
        embeddings,
        config.openai.embedding_model.clone(),
        ChunkingConfig::new(config.index.chunk_size, config.index.chunk_overlap),
        config.index.path.clone(),
    ))
}

fn require_api_key(config: &AppConfig) -> anyhow::Result<String> {
    config.api_key().ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY (or APP__OPENAI__API_KEY) must be set")
    })
}
