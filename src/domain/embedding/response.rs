use serde::{Deserialize, Serialize};

/// A single embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    index: usize,
    embedding: Vec<f32>,
}

impl Embedding {
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self { index, embedding }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn vector(&self) -> &[f32] {
        &self.embedding
    }

    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.embedding
    }
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Usage statistics for an embedding request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}

impl EmbeddingUsage {
    pub fn new(prompt_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            total_tokens,
        }
    }

    pub fn prompt_tokens(&self) -> u32 {
        self.prompt_tokens
    }

    pub fn total_tokens(&self) -> u32 {
        self.total_tokens
    }
}

/// Response from an embedding request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    model: String,
    data: Vec<Embedding>,
    usage: EmbeddingUsage,
}

impl EmbeddingResponse {
    pub fn new(model: String, data: Vec<Embedding>, usage: EmbeddingUsage) -> Self {
        Self { model, data, usage }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embeddings(&self) -> &[Embedding] {
        &self.data
    }

    pub fn first(&self) -> Option<&Embedding> {
        self.data.first()
    }

    pub fn usage(&self) -> &EmbeddingUsage {
        &self.usage
    }
}
