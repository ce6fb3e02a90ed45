//! Application configuration

mod app_config;

pub use app_config::{AppConfig, AppSection, LogFormat, LoggingConfig, ServerConfig, StorageConfig};
