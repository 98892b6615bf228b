//! Infrastructure implementations of the domain contracts.

pub mod answer_cache;
pub mod embedding;
pub mod extract;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod services;
pub mod session;
