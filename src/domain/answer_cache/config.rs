use serde::{Deserialize, Serialize};

/// Configuration for the fuzzy answer cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerCacheConfig {
    /// Minimum prompt similarity for a cache hit, in [0, 1].
    /// Comparison is inclusive: a query exactly at the threshold hits.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

fn default_similarity_threshold() -> f64 {
    0.8
}

impl Default for AnswerCacheConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl AnswerCacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = AnswerCacheConfig::default();
        assert!((config.similarity_threshold - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_clamped() {
        let config = AnswerCacheConfig::new().with_similarity_threshold(1.5);
        assert!((config.similarity_threshold - 1.0).abs() < f64::EPSILON);

        let config = AnswerCacheConfig::new().with_similarity_threshold(-0.5);
        assert!(config.similarity_threshold.abs() < f64::EPSILON);
    }
}
