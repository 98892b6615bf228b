//! Chunking strategy trait and types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Configuration for chunking. Sizes are measured in tokens, not characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in tokens
    pub max_tokens: usize,
    /// Overlap between consecutive chunks in tokens
    pub overlap_tokens: usize,
}

impl ChunkingConfig {
    pub fn new(max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            max_tokens,
            overlap_tokens,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_tokens == 0 {
            return Err(DomainError::validation("max_tokens must be greater than 0"));
        }

        if self.overlap_tokens >= self.max_tokens {
            return Err(DomainError::validation(
                "overlap_tokens must be less than max_tokens",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            overlap_tokens: 24,
        }
    }
}

/// A bounded span of source text produced at index-build time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    /// Position of this chunk in the source document (0-based)
    pub index: usize,
}

impl Chunk {
    pub fn new(content: impl Into<String>, index: usize) -> Self {
        Self {
            content: content.into(),
            index,
        }
    }
}

/// Trait for chunking strategies
pub trait ChunkingStrategy: Send + Sync + Debug {
    /// Split content into chunks according to the configuration
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validate_zero_size() {
        let config = ChunkingConfig::new(0, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_overlap_too_large() {
        let config = ChunkingConfig::new(100, 100);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = ChunkingConfig::default();
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.overlap_tokens, 24);
        assert!(config.validate().is_ok());
    }
}
