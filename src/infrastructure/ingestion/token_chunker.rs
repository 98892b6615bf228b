//! Token-count chunking strategy backed by tiktoken.

use std::fmt;

use tiktoken_rs::{p50k_base, CoreBPE};

use crate::domain::ingestion::{Chunk, ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Splits text into chunks whose size is measured in tokens, with a fixed
/// token overlap carried between consecutive chunks.
///
/// Words are packed greedily until the token budget is reached; the trailing
/// words whose token counts sum to at least the configured overlap seed the
/// next chunk. A single word larger than the budget becomes its own chunk.
pub struct TokenTextChunker {
    bpe: CoreBPE,
}

impl TokenTextChunker {
    pub fn new() -> Result<Self, DomainError> {
        let bpe = p50k_base()
            .map_err(|e| DomainError::configuration(format!("failed to load tokenizer: {e}")))?;

        Ok(Self { bpe })
    }

    /// Number of tokens in `text` under this chunker's encoding
    pub fn token_count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

impl fmt::Debug for TokenTextChunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenTextChunker").finish_non_exhaustive()
    }
}

impl ChunkingStrategy for TokenTextChunker {
    fn chunk(&self, content: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        let words: Vec<&str> = content.split_whitespace().collect();

        if words.is_empty() {
            return Ok(vec![]);
        }

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_tokens = 0usize;

        for word in words {
            let word_tokens = self.token_count(word);

            if !current.is_empty() && current_tokens + word_tokens > config.max_tokens {
                chunks.push(Chunk::new(current.join(" "), chunks.len()));

                // Seed the next chunk with the trailing overlap
                let mut overlap: Vec<&str> = Vec::new();
                let mut overlap_tokens = 0usize;
                for &carried in current.iter().rev() {
                    if overlap_tokens >= config.overlap_tokens {
                        break;
                    }
                    overlap_tokens += self.token_count(carried);
                    overlap.push(carried);
                }
                overlap.reverse();

                current = overlap;
                current_tokens = overlap_tokens;
            }

            current_tokens += word_tokens;
            current.push(word);
        }

        if !current.is_empty() {
            chunks.push(Chunk::new(current.join(" "), chunks.len()));
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "token"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker() -> TokenTextChunker {
        TokenTextChunker::new().unwrap()
    }

    #[test]
    fn test_empty_content() {
        let chunks = chunker().chunk("", &ChunkingConfig::default()).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        let chunks = chunker()
            .chunk("   \n\t  ", &ChunkingConfig::default())
            .unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_content_is_one_chunk() {
        let chunks = chunker()
            .chunk("a short sentence", &ChunkingConfig::default())
            .unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "a short sentence");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_long_content_respects_token_budget() {
        let chunker = chunker();
        let text = "the manual describes the warranty and return process in detail "
            .repeat(40);
        let config = ChunkingConfig::new(32, 4);

        let chunks = chunker.chunk(&text, &config).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            let word_token_sum: usize = chunk
                .content
                .split_whitespace()
                .map(|w| chunker.token_count(w))
                .sum();
            assert!(
                word_token_sum <= config.max_tokens,
                "chunk exceeds budget: {word_token_sum}"
            );
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let chunker = chunker();
        let text = "alpha beta gamma delta epsilon zeta eta theta ".repeat(30);
        let config = ChunkingConfig::new(24, 4);

        let chunks = chunker.chunk(&text, &config).unwrap();
        assert!(chunks.len() > 1);

        for pair in chunks.windows(2) {
            let prev_last = pair[0].content.split_whitespace().last().unwrap();
            let next_words: Vec<&str> = pair[1].content.split_whitespace().collect();

            // The next chunk starts with the previous chunk's trailing words
            assert!(
                next_words.contains(&prev_last),
                "no overlap between consecutive chunks"
            );
        }
    }

    #[test]
    fn test_chunk_indices_are_sequential() {
        let chunker = chunker();
        let text = "one two three four five six seven eight nine ten ".repeat(20);
        let chunks = chunker.chunk(&text, &ChunkingConfig::new(16, 2)).unwrap();

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = chunker().chunk("text", &ChunkingConfig::new(10, 10));
        assert!(result.is_err());
    }
}
