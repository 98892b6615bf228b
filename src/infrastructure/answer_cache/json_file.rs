//! File-backed fuzzy answer cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::answer_cache::{
    normalize_prompt, prompt_similarity, AnswerCache, AnswerCacheConfig, CachedAnswer,
};
use crate::domain::DomainError;

/// Answer cache persisted as a JSON array in insertion order.
///
/// Entries are kept as an ordered list rather than a map: lookup must return
/// the earliest-inserted key on ties, and JSON objects do not guarantee key
/// order across readers.
///
/// Every store rewrites the whole file. Lookup scans all entries linearly;
/// acceptable while the cache stays small.
#[derive(Debug)]
pub struct JsonFileAnswerCache {
    path: PathBuf,
    config: AnswerCacheConfig,
    entries: RwLock<Vec<CachedAnswer>>,
}

impl JsonFileAnswerCache {
    /// Open the cache at `path`, loading any persisted entries.
    ///
    /// A missing file yields an empty cache; malformed content is a fatal
    /// parse error.
    pub fn open(path: impl Into<PathBuf>, config: AnswerCacheConfig) -> Result<Self, DomainError> {
        let path = path.into();
        let entries = Self::load_entries(&path)?;

        debug!(
            path = %path.display(),
            entries = entries.len(),
            "Opened answer cache"
        );

        Ok(Self {
            path,
            config,
            entries: RwLock::new(entries),
        })
    }

    fn load_entries(path: &Path) -> Result<Vec<CachedAnswer>, DomainError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            DomainError::cache(format!("failed to read cache '{}': {}", path.display(), e))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            DomainError::cache(format!("failed to parse cache '{}': {}", path.display(), e))
        })
    }

    fn persist(&self, entries: &[CachedAnswer]) -> Result<(), DomainError> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| DomainError::cache(format!("failed to serialize cache: {}", e)))?;

        fs::write(&self.path, raw).map_err(|e| {
            DomainError::cache(format!(
                "failed to write cache '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    fn lock_read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<CachedAnswer>>, DomainError> {
        self.entries
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn lock_write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, Vec<CachedAnswer>>, DomainError> {
        self.entries
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl AnswerCache for JsonFileAnswerCache {
    async fn lookup(&self, query: &str) -> Result<Option<String>, DomainError> {
        let key = normalize_prompt(query);
        let entries = self.lock_read()?;

        // First match in insertion order wins; comparison is inclusive.
        for entry in entries.iter() {
            let similarity = prompt_similarity(&key, entry.key());

            if similarity >= self.config.similarity_threshold {
                debug!(
                    similarity,
                    key = entry.key(),
                    "Answer cache hit"
                );
                return Ok(Some(entry.answer().to_string()));
            }
        }

        debug!(entries = entries.len(), "Answer cache miss");
        Ok(None)
    }

    async fn store(&self, prompt: &str, answer: &str) -> Result<(), DomainError> {
        let entry = CachedAnswer::new(prompt, answer);
        let mut entries = self.lock_write()?;

        // Overwrite in place keeps the original insertion position
        match entries.iter_mut().find(|e| e.key() == entry.key()) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }

        self.persist(&entries)
    }

    async fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}
