use serde::{Deserialize, Serialize};

/// A chunk of the source document together with its embedding.
/// Immutable after index build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
}

impl IndexedChunk {
    pub fn new(id: impl Into<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            embedding,
        }
    }
}

/// A retrieved chunk with its similarity to the query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub content: String,
    pub similarity: f32,
}

impl ScoredChunk {
    pub fn new(content: impl Into<String>, similarity: f32) -> Self {
        Self {
            content: content.into(),
            similarity,
        }
    }
}
