mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, ChatConfig, IndexConfig, LogFormat, LoggingConfig, OpenAiConfig,
    ServerConfig,
};
