use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub openai: OpenAiConfig,
    pub index: IndexConfig,
    pub cache: CacheConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// OpenAI-compatible provider settings. The API key is supplied via the
/// environment (`APP__OPENAI__API_KEY` or plain `OPENAI_API_KEY`) and is
/// never logged or serialized back out.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f32,
}

/// Vector index build and retrieval settings
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub path: String,
    /// Maximum chunk size, measured in tokens
    pub chunk_size: usize,
    /// Overlap between consecutive chunks, in tokens
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per query
    pub top_k: usize,
}

/// Answer cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub path: String,
    /// Minimum prompt similarity for a cache hit, in [0, 1]
    pub similarity_threshold: f64,
}

/// Prompting settings for the chat model
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub system_prompt: String,
    /// Reply the model is instructed to give when the answer is not in the
    /// manual. Answers equal to this phrase are never cached.
    pub fallback_phrase: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            chat_model: "gpt-3.5-turbo".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            temperature: 0.1,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: "manual.index.json".to_string(),
            chunk_size: 512,
            chunk_overlap: 24,
            top_k: 10,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "answer_cache.json".to_string(),
            similarity_threshold: 0.8,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are an assistant that answers questions about a manual. \
                            Answer using only the information in the excerpts provided in \
                            the assistant message. If the answer is covered by the excerpts, \
                            start your reply with 'From the manual:'. If it is not, reply \
                            exactly: 'The text was not found in the manual, can I help you \
                            with anything else?'"
                .to_string(),
            fallback_phrase:
                "The text was not found in the manual, can I help you with anything else?"
                    .to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the provider API key, falling back to `OPENAI_API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.openai
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}
