//! In-memory VisitRepository

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use fl_core::entities::SiteVisit;
use fl_core::traits::{RepoResult, VisitRepository};

#[derive(Debug, Default)]
struct VisitState {
    visits: HashMap<(String, String), SiteVisit>,
    metrics: HashMap<String, u64>,
}

#[derive(Debug, Default)]
pub struct MemoryVisitRepository {
    state: Mutex<VisitState>,
}

impl MemoryVisitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitRepository for MemoryVisitRepository {
    async fn record_visit(&self, visit: &SiteVisit) -> RepoResult<bool> {
        let mut state = self.state.lock();
        let key = (visit.visitor_id.clone(), visit.day_key.clone());
        match state.visits.get_mut(&key) {
            Some(existing) => {
                existing.ip_address.clone_from(&visit.ip_address);
                existing.user_agent.clone_from(&visit.user_agent);
                existing.last_visited_at = visit.last_visited_at;
                Ok(false)
            }
            None => {
                state.visits.insert(key, visit.clone());
                Ok(true)
            }
        }
    }

    async fn increment_metric(&self, key: &str) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let value = state.metrics.entry(key.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn metric(&self, key: &str) -> RepoResult<u64> {
        Ok(self.state.lock().metrics.get(key).copied().unwrap_or(0))
    }

    async fn count_visitors(&self, day_key: &str) -> RepoResult<u64> {
        let state = self.state.lock();
        Ok(state.visits.keys().filter(|(_, day)| day == day_key).count() as u64)
    }
}
