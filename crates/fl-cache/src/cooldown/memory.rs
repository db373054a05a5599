//! Process-local cooldowns
//!
//! Entries are never removed on read; a periodic `sweep` evicts the ones whose
//! interval has passed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;

use fl_core::traits::{CooldownState, CooldownStore, RepoResult};

/// Last action time per key
#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    last_action: DashMap<String, DateTime<Utc>>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.last_action.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_action.is_empty()
    }
}

/// Time since `last`, or zero if the clock went backwards
fn elapsed_since(last: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - last).to_std().unwrap_or(Duration::ZERO)
}

#[async_trait]
impl CooldownStore for MemoryCooldownStore {
    async fn try_acquire(
        &self,
        key: &str,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> RepoResult<CooldownState> {
        match self.last_action.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let elapsed = elapsed_since(*entry.get(), now);
                if elapsed < interval {
                    Ok(CooldownState::Cooling {
                        retry_after: interval - elapsed,
                    })
                } else {
                    entry.insert(now);
                    Ok(CooldownState::Acquired)
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                Ok(CooldownState::Acquired)
            }
        }
    }

    async fn sweep(&self, interval: Duration, now: DateTime<Utc>) -> RepoResult<usize> {
        let before = self.last_action.len();
        self.last_action
            .retain(|_, last| elapsed_since(*last, now) < interval);
        Ok(before.saturating_sub(self.last_action.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(15);

    #[tokio::test]
    async fn test_second_action_inside_interval_is_cooling() {
        let store = MemoryCooldownStore::new();
        let now = Utc::now();

        assert_eq!(
            store.try_acquire("r1:v1", COOLDOWN, now).await.unwrap(),
            CooldownState::Acquired
        );
        assert_eq!(
            store
                .try_acquire("r1:v1", COOLDOWN, now + chrono::Duration::seconds(5))
                .await
                .unwrap(),
            CooldownState::Cooling {
                retry_after: Duration::from_secs(10)
            }
        );
    }

    #[tokio::test]
    async fn test_cooling_does_not_extend_interval() {
        let store = MemoryCooldownStore::new();
        let now = Utc::now();

        store.try_acquire("k", COOLDOWN, now).await.unwrap();
        store
            .try_acquire("k", COOLDOWN, now + chrono::Duration::seconds(10))
            .await
            .unwrap();

        let state = store
            .try_acquire("k", COOLDOWN, now + chrono::Duration::seconds(15))
            .await
            .unwrap();
        assert_eq!(state, CooldownState::Acquired);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryCooldownStore::new();
        let now = Utc::now();

        store.try_acquire("r1:v1", COOLDOWN, now).await.unwrap();
        let other_visitor = store.try_acquire("r1:v2", COOLDOWN, now).await.unwrap();
        let other_review = store.try_acquire("r2:v1", COOLDOWN, now).await.unwrap();

        assert_eq!(other_visitor, CooldownState::Acquired);
        assert_eq!(other_review, CooldownState::Acquired);
    }

    #[tokio::test]
    async fn test_sweep_evicts_elapsed_entries() {
        let store = MemoryCooldownStore::new();
        let now = Utc::now();

        store.try_acquire("old", COOLDOWN, now).await.unwrap();
        store
            .try_acquire("fresh", COOLDOWN, now + chrono::Duration::seconds(20))
            .await
            .unwrap();

        let removed = store
            .sweep(COOLDOWN, now + chrono::Duration::seconds(25))
            .await
            .unwrap();

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
    }
}
