//! Text extraction and chunking contracts.

mod chunker;
mod extractor;

pub use chunker::{Chunk, ChunkingConfig, ChunkingStrategy};
pub use extractor::TextExtractor;
