use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize_prompt;

/// A cached prompt/answer pair.
///
/// `key` is the canonical (normalized) prompt that similarity runs against;
/// the original prompt is retained for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAnswer {
    key: String,
    prompt: String,
    answer: String,
    created_at: DateTime<Utc>,
}

impl CachedAnswer {
    /// Create an entry from the prompt as the user typed it.
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        let prompt = prompt.into();

        Self {
            key: normalize_prompt(&prompt),
            prompt,
            answer: answer.into(),
            created_at: Utc::now(),
        }
    }

    /// The canonical cache key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The prompt as originally typed
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The cached answer text
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
