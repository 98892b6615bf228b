use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
