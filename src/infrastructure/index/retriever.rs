use std::sync::Arc;

use async_trait::async_trait;

use super::FlatFileIndex;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::index::{ChunkRetriever, ScoredChunk};
use crate::domain::DomainError;

/// Retrieves chunks by embedding the query and searching the flat-file index
#[derive(Debug)]
pub struct EmbeddingRetriever {
    index: Arc<FlatFileIndex>,
    embeddings: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingRetriever {
    pub fn new(index: Arc<FlatFileIndex>, embeddings: Arc<dyn EmbeddingProvider>) -> Self {
        Self { index, embeddings }
    }
}

#[async_trait]
impl ChunkRetriever for EmbeddingRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredChunk>, DomainError> {
        let request = EmbeddingRequest::single(self.index.embedding_model(), query);
        let response = self.embeddings.embed(request).await?;

        let embedding = response.first().ok_or_else(|| {
            DomainError::provider(self.embeddings.provider_name(), "No embedding returned")
        })?;

        Ok(self.index.search(embedding.vector(), top_k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::index::IndexedChunk;

    #[tokio::test]
    async fn test_retrieve_returns_top_k() {
        let provider = MockEmbeddingProvider::new("mock", 8);

        // Embed the chunk contents with the same mock so the query embedding
        // of identical text scores 1.0 against its own chunk.
        let texts = ["thirty day returns", "warranty details", "support contact"];
        let mut chunks = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            let response = provider
                .embed(EmbeddingRequest::single("mock", *text))
                .await
                .unwrap();
            chunks.push(IndexedChunk::new(
                format!("c{i}"),
                *text,
                response.embeddings()[0].vector().to_vec(),
            ));
        }

        let index = Arc::new(FlatFileIndex::new("mock", chunks));
        let retriever = EmbeddingRetriever::new(index, Arc::new(provider));

        let results = retriever.retrieve("warranty details", 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "warranty details");
        assert!((results[0].similarity - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_retrieve_propagates_provider_error() {
        let provider = MockEmbeddingProvider::new("mock", 8).with_error("quota exceeded");
        let index = Arc::new(FlatFileIndex::new("mock", vec![]));
        let retriever = EmbeddingRetriever::new(index, Arc::new(provider));

        assert!(retriever.retrieve("anything", 5).await.is_err());
    }
}
