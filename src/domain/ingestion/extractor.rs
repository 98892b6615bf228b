use std::fmt::Debug;
use std::path::Path;

use crate::domain::DomainError;

/// Trait for extracting plain text from a source document
pub trait TextExtractor: Send + Sync + Debug {
    /// Extract the full text of the document at `path`
    fn extract(&self, path: &Path) -> Result<String, DomainError>;

    /// Get the extractor name
    fn name(&self) -> &'static str;
}
