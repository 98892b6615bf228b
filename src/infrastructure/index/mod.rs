mod flat_file;
mod retriever;

pub use flat_file::FlatFileIndex;
pub use retriever::EmbeddingRetriever;
