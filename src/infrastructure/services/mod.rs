mod chat_service;
mod ingestion_service;

pub use chat_service::{ChatService, ChatServiceConfig, GeneratedAnswer};
pub use ingestion_service::IngestionService;
