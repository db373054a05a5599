//! Cooldowns shared through Redis.
//!
//! A cooldown is a key set with `NX` and a TTL equal to the interval; its
//! presence means the caller is still cooling down.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use fl_core::traits::{CooldownState, CooldownStore, RepoResult};

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for cooldown entries
const COOLDOWN_PREFIX: &str = "cooldown:";

/// Redis-backed cooldowns
#[derive(Debug, Clone)]
pub struct RedisCooldownStore {
    pool: RedisPool,
}

impl RedisCooldownStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    fn key(key: &str) -> String {
        format!("{COOLDOWN_PREFIX}{key}")
    }
}

#[async_trait]
impl CooldownStore for RedisCooldownStore {
    async fn try_acquire(
        &self,
        key: &str,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> RepoResult<CooldownState> {
        let key = Self::key(key);
        let interval_ms = interval.as_millis().max(1) as u64;
        let mut conn = self.pool.get().await?;

        let set: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(now.timestamp_millis())
            .arg("NX")
            .arg("PX")
            .arg(interval_ms)
            .query_async(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;

        if set.is_some() {
            return Ok(CooldownState::Acquired);
        }

        let ttl_ms: i64 = redis::cmd("PTTL")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(RedisPoolError::from)?;

        // The key can expire between the two commands; report the shortest wait
        let retry_after = u64::try_from(ttl_ms).map_or(Duration::from_millis(1), Duration::from_millis);
        Ok(CooldownState::Cooling { retry_after })
    }

    /// Keys expire on their own
    async fn sweep(&self, _interval: Duration, _now: DateTime<Utc>) -> RepoResult<usize> {
        Ok(0)
    }
}
