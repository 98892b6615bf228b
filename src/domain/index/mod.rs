//! Vector index entities and the retrieval trait.

mod entry;
mod retriever;

pub use entry::{IndexedChunk, ScoredChunk};
pub use retriever::ChunkRetriever;

#[cfg(test)]
pub use retriever::mock::MockChunkRetriever;
