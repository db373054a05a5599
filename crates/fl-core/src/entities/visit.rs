//! Site visit entity - one row per visitor per UTC day

use chrono::{DateTime, Utc};

/// Site metric incremented on the first visit of a visitor each day
pub const TOTAL_VISITS_METRIC: &str = "totalVisits";

/// Visit of a pseudonymous visitor on a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteVisit {
    pub visitor_id: String,
    /// `YYYY-MM-DD` in UTC
    pub day_key: String,
    pub ip_address: String,
    pub user_agent: String,
    pub first_visited_at: DateTime<Utc>,
    pub last_visited_at: DateTime<Utc>,
}

impl SiteVisit {
    /// Create a visit observed at `now`
    pub fn new(
        visitor_id: String,
        ip_address: String,
        user_agent: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            visitor_id,
            day_key: Self::day_key(now),
            ip_address,
            user_agent,
            first_visited_at: now,
            last_visited_at: now,
        }
    }

    /// Day bucket for a timestamp
    pub fn day_key(at: DateTime<Utc>) -> String {
        at.format("%Y-%m-%d").to_string()
    }
}
