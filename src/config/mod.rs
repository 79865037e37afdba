mod app_config;

pub use app_config::{AppConfig, GeoBlockConfig, LogFormat, LoggingConfig, ServerConfig};
