//! Store traits (ports) for ephemeral anti-abuse state and uploaded files
//!
//! Rate-limit windows and like cooldowns live behind these traits so a single
//! instance can keep them in memory while several instances share them
//! through an external store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use super::repositories::RepoResult;

/// Fixed rate-limit window after counting one more request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Requests counted in the current window, including this one
    pub count: u32,
    /// When the current window ends
    pub reset_at: DateTime<Utc>,
}

impl WindowState {
    /// Time left until the window resets, as seen from `now`
    pub fn reset_after(&self, now: DateTime<Utc>) -> Duration {
        (self.reset_at - now).to_std().unwrap_or(Duration::ZERO)
    }
}

#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Count one request for `key`.
    ///
    /// Starts a new window of length `window` when none exists or the previous
    /// one has elapsed.
    async fn hit(&self, key: &str, window: Duration, now: DateTime<Utc>) -> RepoResult<WindowState>;

    /// Drop windows that ended before `now`. Returns the number removed.
    ///
    /// Stores with native expiry have nothing to do.
    async fn sweep(&self, _now: DateTime<Utc>) -> RepoResult<usize> {
        Ok(0)
    }
}

/// Outcome of trying to take a cooldown slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    /// No recent action; `now` has been recorded
    Acquired,
    /// A previous action is still inside the interval
    Cooling { retry_after: Duration },
}

#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// Record `now` for `key` unless an action was recorded less than `interval` ago
    async fn try_acquire(
        &self,
        key: &str,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> RepoResult<CooldownState>;

    /// Drop entries whose interval has elapsed. Returns the number removed.
    async fn sweep(&self, interval: Duration, now: DateTime<Utc>) -> RepoResult<usize>;
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a file and return the public URL it is served from
    async fn upload(&self, data: &[u8], file_name: &str) -> RepoResult<String>;
}
