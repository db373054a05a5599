//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).
//! Only the listen port has no default; database, Redis, and mail are optional
//! and their absence selects in-memory stores or disables delivery.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
    pub rate_limit: RateLimitConfig,
    pub cooldown: CooldownConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub bootstrap: BootstrapConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Identify clients by the first `X-Forwarded-For` hop instead of the peer address
    #[serde(default)]
    pub trust_proxy: bool,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Request ceiling for one route class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitRule {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl RateLimitRule {
    #[must_use]
    pub const fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Rate limiting configuration, one rule per route class
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub general: RateLimitRule,
    pub login: RateLimitRule,
    pub review: RateLimitRule,
    pub like: RateLimitRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            general: RateLimitRule::new(300, 15 * 60),
            login: RateLimitRule::new(10, 15 * 60),
            review: RateLimitRule::new(1, 5 * 60),
            like: RateLimitRule::new(30, 5 * 60),
        }
    }
}

/// Like cooldown configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CooldownConfig {
    #[serde(default = "default_like_cooldown")]
    pub like_cooldown_secs: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl CooldownConfig {
    #[must_use]
    pub const fn like_cooldown(&self) -> Duration {
        Duration::from_secs(self.like_cooldown_secs)
    }

    #[must_use]
    pub const fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            like_cooldown_secs: default_like_cooldown(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Uploaded image storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u32,
    /// Base URL that prefixes `/uploads/<file>` in returned image URLs
    pub public_base_url: String,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

/// Outbound mail configuration for moderation alerts.
///
/// Everything is optional: without a host or recipient, alerts are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    #[serde(default = "default_smtp_timeout")]
    pub timeout_secs: u64,
    pub from: Option<String>,
    pub notify_to: Option<String>,
}

impl MailConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_pass: None,
            timeout_secs: default_smtp_timeout(),
            from: None,
            notify_to: None,
        }
    }
}

/// Startup seeding
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    pub admin_password: Option<String>,
    #[serde(default = "default_true")]
    pub seed_sample_products: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: None,
            seed_sample_products: true,
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "fl-store".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_like_cooldown() -> u64 {
    15
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u32 {
    10
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_timeout() -> u64 {
    10
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        let port = default_port();
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            api: ServerConfig {
                host: default_host(),
                port,
                trust_proxy: false,
            },
            database: None,
            redis: None,
            rate_limit: RateLimitConfig::default(),
            cooldown: CooldownConfig::default(),
            cors: CorsConfig::default(),
            storage: StorageConfig {
                upload_dir: default_upload_dir(),
                max_file_size_mb: default_max_file_size(),
                public_base_url: format!("http://localhost:{port}"),
            },
            mail: MailConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

/// Read and parse an optional environment variable.
///
/// A set but unparsable value is an error rather than silently ignored.
fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(None),
    }
}

/// Read an optional, non-empty string variable
fn string_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn rule_from_env(
    max_key: &'static str,
    window_key: &'static str,
    fallback: RateLimitRule,
) -> Result<RateLimitRule, ConfigError> {
    Ok(RateLimitRule {
        max_requests: parse_var(max_key)?.unwrap_or(fallback.max_requests),
        window_secs: parse_var(window_key)?.unwrap_or(fallback.window_secs),
    })
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let port = parse_var("API_PORT")?.unwrap_or(defaults.api.port);

        Ok(Self {
            app: AppSettings {
                name: string_var("APP_NAME").unwrap_or(defaults.app.name),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: string_var("API_HOST").unwrap_or(defaults.api.host),
                port,
                trust_proxy: parse_var("TRUST_PROXY")?.unwrap_or(false),
            },
            database: match string_var("DATABASE_URL") {
                Some(url) => Some(DatabaseConfig {
                    url,
                    max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                        .unwrap_or_else(default_max_connections),
                    min_connections: parse_var("DATABASE_MIN_CONNECTIONS")?
                        .unwrap_or_else(default_min_connections),
                }),
                None => None,
            },
            redis: match string_var("REDIS_URL") {
                Some(url) => Some(RedisConfig {
                    url,
                    max_connections: parse_var("REDIS_MAX_CONNECTIONS")?
                        .unwrap_or_else(default_redis_max_connections),
                }),
                None => None,
            },
            rate_limit: RateLimitConfig {
                general: rule_from_env(
                    "RATE_LIMIT_GENERAL_MAX",
                    "RATE_LIMIT_GENERAL_WINDOW_SECS",
                    defaults.rate_limit.general,
                )?,
                login: rule_from_env(
                    "RATE_LIMIT_LOGIN_MAX",
                    "RATE_LIMIT_LOGIN_WINDOW_SECS",
                    defaults.rate_limit.login,
                )?,
                review: rule_from_env(
                    "RATE_LIMIT_REVIEW_MAX",
                    "RATE_LIMIT_REVIEW_WINDOW_SECS",
                    defaults.rate_limit.review,
                )?,
                like: rule_from_env(
                    "RATE_LIMIT_LIKE_MAX",
                    "RATE_LIMIT_LIKE_WINDOW_SECS",
                    defaults.rate_limit.like,
                )?,
            },
            cooldown: CooldownConfig {
                like_cooldown_secs: parse_var("LIKE_COOLDOWN_SECS")?
                    .unwrap_or(defaults.cooldown.like_cooldown_secs),
                sweep_interval_secs: parse_var("COOLDOWN_SWEEP_INTERVAL_SECS")?
                    .unwrap_or(defaults.cooldown.sweep_interval_secs),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                upload_dir: string_var("UPLOAD_DIR").unwrap_or(defaults.storage.upload_dir),
                max_file_size_mb: parse_var("MAX_FILE_SIZE_MB")?
                    .unwrap_or(defaults.storage.max_file_size_mb),
                public_base_url: string_var("PUBLIC_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| format!("http://localhost:{port}")),
            },
            mail: MailConfig {
                smtp_host: string_var("SMTP_HOST"),
                smtp_port: parse_var("SMTP_PORT")?.unwrap_or(defaults.mail.smtp_port),
                smtp_user: string_var("SMTP_USER"),
                smtp_pass: string_var("SMTP_PASS"),
                timeout_secs: parse_var("SMTP_TIMEOUT_SECS")?
                    .unwrap_or(defaults.mail.timeout_secs),
                from: string_var("MAIL_FROM"),
                notify_to: string_var("REVIEW_NOTIFY_TO"),
            },
            bootstrap: BootstrapConfig {
                admin_username: string_var("ADMIN_USERNAME")
                    .unwrap_or(defaults.bootstrap.admin_username),
                admin_password: string_var("ADMIN_PASSWORD"),
                seed_sample_products: parse_var("SEED_SAMPLE_PRODUCTS")?
                    .unwrap_or(defaults.bootstrap.seed_sample_products),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
