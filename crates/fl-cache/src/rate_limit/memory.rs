//! Process-local rate-limit windows

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::Duration;

use fl_core::error::DomainError;
use fl_core::traits::{RateLimitStore, RepoResult, WindowState};

/// Windows keyed by `<client>:<route class>`.
///
/// Counters reset on restart.
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    windows: DashMap<String, WindowState>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked windows, expired ones included
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn hit(&self, key: &str, window: Duration, now: DateTime<Utc>) -> RepoResult<WindowState> {
        let window = chrono::Duration::from_std(window)
            .map_err(|e| DomainError::CacheError(format!("invalid window: {e}")))?;
        let fresh = WindowState {
            count: 0,
            reset_at: now + window,
        };

        // The shard lock is held until `state` drops, so check-and-increment is atomic
        let mut state = self.windows.entry(key.to_string()).or_insert(fresh);
        if now >= state.reset_at {
            *state = fresh;
        }
        state.count = state.count.saturating_add(1);

        Ok(*state)
    }

    async fn sweep(&self, now: DateTime<Utc>) -> RepoResult<usize> {
        let before = self.windows.len();
        self.windows.retain(|_, state| now < state.reset_at);
        Ok(before.saturating_sub(self.windows.len()))
    }
}
