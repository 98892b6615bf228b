use async_trait::async_trait;
use std::fmt::Debug;

use super::ScoredChunk;
use crate::domain::DomainError;

/// Trait for retrieving the chunks most similar to a query
#[async_trait]
pub trait ChunkRetriever: Send + Sync + Debug {
    /// Return up to `top_k` chunks ordered by descending similarity
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>, DomainError>;
}
