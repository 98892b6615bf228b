mod token_chunker;

pub use token_chunker::TokenTextChunker;
