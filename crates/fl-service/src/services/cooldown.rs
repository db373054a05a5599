//! Minimum interval between like toggles from one visitor on one review

use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use fl_core::traits::{CooldownState, CooldownStore};
use fl_core::value_objects::ReviewId;

use super::error::{ServiceError, ServiceResult};
use super::rate_limit::{describe_wait, retry_after_secs};

/// Enforces the per `(review, visitor)` like cooldown
pub struct LikeCooldownTracker {
    store: Arc<dyn CooldownStore>,
    interval: Duration,
}

impl LikeCooldownTracker {
    pub fn new(store: Arc<dyn CooldownStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn key(review_id: ReviewId, visitor_id: &str) -> String {
        format!("like:{review_id}:{visitor_id}")
    }

    /// Record a like action now, or reject if the previous one is too recent.
    ///
    /// A rejected attempt does not restart the interval.
    pub async fn check_and_record(&self, review_id: ReviewId, visitor_id: &str) -> ServiceResult<()> {
        let key = Self::key(review_id, visitor_id);
        match self.store.try_acquire(&key, self.interval, Utc::now()).await? {
            CooldownState::Acquired => {
                debug!(review_id = %review_id, visitor_id = %visitor_id, "Like cooldown acquired");
                Ok(())
            }
            CooldownState::Cooling { retry_after } => {
                warn!(
                    review_id = %review_id,
                    visitor_id = %visitor_id,
                    retry_after_ms = retry_after.as_millis() as u64,
                    "Like rejected by cooldown"
                );
                Err(ServiceError::rate_limited(
                    format!(
                        "Espera {} antes de volver a reaccionar a esta reseña.",
                        describe_wait(retry_after)
                    ),
                    retry_after_secs(retry_after),
                ))
            }
        }
    }

    /// Evict entries whose interval has passed
    pub async fn sweep(&self) -> ServiceResult<usize> {
        Ok(self.store.sweep(self.interval, Utc::now()).await?)
    }
}

impl fmt::Debug for LikeCooldownTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LikeCooldownTracker")
            .field("interval", &self.interval)
            .finish()
    }
}
