//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BootstrapConfig, ConfigError, CooldownConfig, CorsConfig,
    DatabaseConfig, Environment, MailConfig, RateLimitConfig, RateLimitRule, RedisConfig,
    ServerConfig, StorageConfig,
};
