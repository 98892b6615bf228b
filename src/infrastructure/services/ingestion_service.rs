//! Index construction: extract, chunk, embed, persist.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::index::IndexedChunk;
use crate::domain::ingestion::{ChunkingConfig, ChunkingStrategy, TextExtractor};
use crate::domain::DomainError;
use crate::infrastructure::index::FlatFileIndex;

/// Builds the vector index from a source document.
///
/// Rebuilding overwrites any prior persisted index; the answer cache is left
/// untouched.
#[derive(Debug)]
pub struct IngestionService {
    extractor: Arc<dyn TextExtractor>,
    chunker: Arc<dyn ChunkingStrategy>,
    embeddings: Arc<dyn EmbeddingProvider>,
    embedding_model: String,
    chunking: ChunkingConfig,
    index_path: PathBuf,
}

impl IngestionService {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        chunker: Arc<dyn ChunkingStrategy>,
        embeddings: Arc<dyn EmbeddingProvider>,
        embedding_model: impl Into<String>,
        chunking: ChunkingConfig,
        index_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            extractor,
            chunker,
            embeddings,
            embedding_model: embedding_model.into(),
            chunking,
            index_path: index_path.into(),
        }
    }

    /// Extract text from the document and (re)build the index from it
    pub async fn ingest_file(&self, path: &Path) -> Result<FlatFileIndex, DomainError> {
        let text = self.extractor.extract(path)?;

        info!(
            source = %path.display(),
            chars = text.len(),
            "Extracted document text"
        );

        self.ingest_text(&text).await
    }

    /// Chunk, embed and persist the given text as the new index
    pub async fn ingest_text(&self, text: &str) -> Result<FlatFileIndex, DomainError> {
        let chunks = self.chunker.chunk(text, &self.chunking)?;

        if chunks.is_empty() {
            return Err(DomainError::validation("document produced no chunks"));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let request = EmbeddingRequest::batch(self.embedding_model.as_str(), texts);
        let response = self.embeddings.embed(request).await?;

        if response.embeddings().len() != chunks.len() {
            return Err(DomainError::provider(
                self.embeddings.provider_name(),
                format!(
                    "expected {} embeddings, got {}",
                    chunks.len(),
                    response.embeddings().len()
                ),
            ));
        }

        let indexed: Vec<IndexedChunk> = chunks
            .into_iter()
            .zip(response.embeddings())
            .map(|(chunk, embedding)| {
                IndexedChunk::new(
                    Uuid::new_v4().to_string(),
                    chunk.content,
                    embedding.vector().to_vec(),
                )
            })
            .collect();

        let index = FlatFileIndex::new(self.embedding_model.as_str(), indexed);
        index.save(&self.index_path)?;

        info!(
            chunks = index.len(),
            path = %self.index_path.display(),
            "Vector index built and persisted"
        );

        Ok(index)
    }
}
