//! PostgreSQL implementation of VisitRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fl_core::entities::SiteVisit;
use fl_core::traits::{RepoResult, VisitRepository};

use super::error::{map_db_error, to_count};

/// PostgreSQL implementation of VisitRepository
#[derive(Clone)]
pub struct PgVisitRepository {
    pool: PgPool,
}

impl PgVisitRepository {
    /// Create a new PgVisitRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    #[instrument(skip(self, visit), fields(visitor_id = %visit.visitor_id, day = %visit.day_key))]
    async fn record_visit(&self, visit: &SiteVisit) -> RepoResult<bool> {
        // xmax is 0 only for a freshly inserted row
        let inserted = sqlx::query_scalar::<_, bool>(
            r"
            INSERT INTO site_visits (visitor_id, day_key, ip_address, user_agent,
                                     first_visited_at, last_visited_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (visitor_id, day_key) DO UPDATE
            SET ip_address = EXCLUDED.ip_address,
                user_agent = EXCLUDED.user_agent,
                last_visited_at = EXCLUDED.last_visited_at
            RETURNING (xmax = 0) AS inserted
            ",
        )
        .bind(&visit.visitor_id)
        .bind(&visit.day_key)
        .bind(&visit.ip_address)
        .bind(&visit.user_agent)
        .bind(visit.first_visited_at)
        .bind(visit.last_visited_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn increment_metric(&self, key: &str) -> RepoResult<u64> {
        let value = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO site_metrics (key, value)
            VALUES ($1, 1)
            ON CONFLICT (key) DO UPDATE SET value = site_metrics.value + 1
            RETURNING value
            ",
        )
        .bind(key)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(to_count(value))
    }

    #[instrument(skip(self))]
    async fn metric(&self, key: &str) -> RepoResult<u64> {
        let value = sqlx::query_scalar::<_, i64>("SELECT value FROM site_metrics WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(value.map_or(0, to_count))
    }

    #[instrument(skip(self))]
    async fn count_visitors(&self, day_key: &str) -> RepoResult<u64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM site_visits WHERE day_key = $1")
                .bind(day_key)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(to_count(count))
    }
}
