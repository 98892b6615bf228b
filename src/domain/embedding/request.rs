use serde::{Deserialize, Serialize};

/// Input for embedding generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// Single text input
    Single(String),
    /// Batch of text inputs
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Get all inputs as a vector
    pub fn as_vec(&self) -> Vec<&str> {
        match self {
            EmbeddingInput::Single(s) => vec![s.as_str()],
            EmbeddingInput::Batch(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EmbeddingInput::Single(_) => 1,
            EmbeddingInput::Batch(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            EmbeddingInput::Single(s) => s.is_empty(),
            EmbeddingInput::Batch(v) => v.is_empty(),
        }
    }
}

/// Request to generate embeddings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    input: EmbeddingInput,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: EmbeddingInput) -> Self {
        Self {
            model: model.into(),
            input,
        }
    }

    /// Create a request for a single text
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(model, EmbeddingInput::Single(text.into()))
    }

    /// Create a request for multiple texts
    pub fn batch(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self::new(model, EmbeddingInput::Batch(texts))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn input(&self) -> &EmbeddingInput {
        &self.input
    }

    /// Get inputs as strings
    pub fn inputs(&self) -> Vec<&str> {
        self.input.as_vec()
    }
}
