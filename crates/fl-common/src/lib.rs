//! # fl-common
//!
//! Shared utilities including configuration, error handling, password hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password, PasswordService};
pub use config::{
    AppConfig, AppSettings, BootstrapConfig, ConfigError, CooldownConfig, CorsConfig,
    DatabaseConfig, Environment, MailConfig, RateLimitConfig, RateLimitRule, RedisConfig,
    ServerConfig, StorageConfig,
};
pub use error::{AppError, AppResult, ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
