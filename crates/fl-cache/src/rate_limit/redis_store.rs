//! Rate-limit windows shared through Redis.
//!
//! Each window is a counter key whose TTL is the time left in the window, so
//! Redis evicts finished windows by itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use fl_core::traits::{RateLimitStore, RepoResult, WindowState};

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for rate-limit windows
const RATE_LIMIT_PREFIX: &str = "ratelimit:";

/// Redis-backed fixed windows
#[derive(Debug, Clone)]
pub struct RedisRateLimitStore {
    pool: RedisPool,
}

impl RedisRateLimitStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(key: &str) -> String {
        format!("{RATE_LIMIT_PREFIX}{key}")
    }
}

#[async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn hit(&self, key: &str, window: Duration, now: DateTime<Utc>) -> RepoResult<WindowState> {
        let key = Self::key(key);
        let window_ms = window.as_millis().max(1) as u64;
        let mut conn = self.pool.get().await?;

        // Create the window if absent, count, and read the time left in one transaction
        let (count, ttl_ms): (u32, i64) = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&key)
            .arg(0)
            .arg("NX")
            .arg("PX")
            .arg(window_ms)
            .ignore()
            .cmd("INCR")
            .arg(&key)
            .cmd("PTTL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;

        // A negative TTL means the key lost its expiry; treat it as a full window
        let ttl_ms = if ttl_ms > 0 { ttl_ms } else { window_ms as i64 };

        Ok(WindowState {
            count,
            reset_at: now + chrono::Duration::milliseconds(ttl_ms),
        })
    }
}
