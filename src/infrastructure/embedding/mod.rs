mod openai;

pub use openai::OpenAiEmbeddingProvider;
