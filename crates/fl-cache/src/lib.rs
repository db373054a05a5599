//! # fl-cache
//!
//! Ephemeral anti-abuse state: fixed rate-limit windows and like cooldowns.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Memory stores**: `DashMap`-backed stores for a single instance
//! - **Redis stores**: shared stores so several instances enforce one limit
//!
//! ## Example
//!
//! ```ignore
//! use fl_cache::{RedisPool, RedisPoolConfig, RedisRateLimitStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let windows = RedisRateLimitStore::new(pool);
//! let state = windows.hit("203.0.113.7:login", Duration::from_secs(900), Utc::now()).await?;
//! ```

pub mod cooldown;
pub mod pool;
pub mod rate_limit;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export store implementations
pub use cooldown::{MemoryCooldownStore, RedisCooldownStore};
pub use rate_limit::{MemoryRateLimitStore, RedisRateLimitStore};
