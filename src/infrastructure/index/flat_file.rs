//! JSON flat-file vector index with linear cosine search.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::embedding::cosine_similarity;
use crate::domain::index::{IndexedChunk, ScoredChunk};
use crate::domain::DomainError;

/// Vector index over document chunks, persisted as a single JSON file.
///
/// Built once at ingest time and reloaded read-only at service start; query
/// traffic never mutates it. Search is a linear cosine scan over all chunks,
/// which is fine at single-manual scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatFileIndex {
    embedding_model: String,
    chunks: Vec<IndexedChunk>,
}

impl FlatFileIndex {
    pub fn new(embedding_model: impl Into<String>, chunks: Vec<IndexedChunk>) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            chunks,
        }
    }

    /// Load a previously persisted index.
    ///
    /// Reports a distinct missing-index error when no file exists so callers
    /// can prompt for ingestion. Persisted content is trusted; a malformed
    /// file is a fatal parse error.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        if !path.exists() {
            return Err(DomainError::index_missing(path.display().to_string()));
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            DomainError::index(format!("failed to read index '{}': {}", path.display(), e))
        })?;

        let index: Self = serde_json::from_str(&raw).map_err(|e| {
            DomainError::index(format!("failed to parse index '{}': {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            chunks = index.chunks.len(),
            "Loaded vector index"
        );

        Ok(index)
    }

    /// Persist the index, overwriting any prior file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), DomainError> {
        let raw = serde_json::to_string(self)
            .map_err(|e| DomainError::index(format!("failed to serialize index: {}", e)))?;

        fs::write(path, raw).map_err(|e| {
            DomainError::index(format!("failed to write index '{}': {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            chunks = self.chunks.len(),
            "Persisted vector index"
        );

        Ok(())
    }

    /// Return up to `top_k` chunks ordered by descending cosine similarity
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<ScoredChunk> {
        let mut scored: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .map(|chunk| {
                ScoredChunk::new(
                    chunk.content.clone(),
                    cosine_similarity(query, &chunk.embedding),
                )
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(top_k);
        scored
    }

    /// The embedding model the index was built with
    pub fn embedding_model(&self) -> &str {
        &self.embedding_model
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> FlatFileIndex {
        FlatFileIndex::new(
            "text-embedding-ada-002",
            vec![
                IndexedChunk::new("c1", "returns are accepted within 30 days", vec![1.0, 0.0]),
                IndexedChunk::new("c2", "the warranty covers manufacturing defects", vec![0.0, 1.0]),
                IndexedChunk::new("c3", "contact support by email", vec![0.7, 0.7]),
            ],
        )
    }

    #[test]
    fn test_search_orders_by_similarity() {
        let index = sample_index();
        let results = index.search(&[1.0, 0.0], 3);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].content, "returns are accepted within 30 days");
        assert!(results[0].similarity > results[1].similarity);
    }

    #[test]
    fn test_search_truncates_to_top_k() {
        let index = sample_index();
        let results = index.search(&[1.0, 0.0], 2);

        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.index.json");

        let index = sample_index();
        index.save(&path).unwrap();

        let loaded = FlatFileIndex::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.embedding_model(), "text-embedding-ada-002");

        let results = loaded.search(&[0.0, 1.0], 1);
        assert_eq!(results[0].content, "the warranty covers manufacturing defects");
    }

    #[test]
    fn test_load_missing_file_is_distinct_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.index.json");

        let result = FlatFileIndex::load(&path);
        assert!(matches!(result, Err(DomainError::IndexMissing { .. })));
    }

    #[test]
    fn test_load_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.index.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = FlatFileIndex::load(&path);
        assert!(matches!(result, Err(DomainError::Index { .. })));
    }

    #[test]
    fn test_rebuild_overwrites_prior_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.index.json");

        sample_index().save(&path).unwrap();

        let rebuilt = FlatFileIndex::new(
            "text-embedding-ada-002",
            vec![IndexedChunk::new("c1", "only chunk", vec![1.0])],
        );
        rebuilt.save(&path).unwrap();

        let loaded = FlatFileIndex::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
