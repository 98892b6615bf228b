use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for the fuzzy answer cache.
///
/// Lookup scans every stored key in insertion order and returns the answer of
/// the first key whose similarity to the normalized query meets the
/// configured threshold. Linear scan is an accepted small-scale design; a
/// larger deployment would need an approximate-nearest-neighbor index over
/// cached-prompt embeddings instead.
#[async_trait]
pub trait AnswerCache: Send + Sync + Debug {
    /// Find the cached answer for a query, if any stored prompt is similar
    /// enough.
    async fn lookup(&self, query: &str) -> Result<Option<String>, DomainError>;

    /// Insert or overwrite the answer for a prompt and persist the cache.
    /// Persistence failures are fatal and propagate to the caller.
    async fn store(&self, prompt: &str, answer: &str) -> Result<(), DomainError>;

    /// Number of cached entries
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
