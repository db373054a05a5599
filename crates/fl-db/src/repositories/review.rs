//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use fl_core::entities::{RatingOrder, Review, ReviewStats, ReviewStatus};
use fl_core::traits::{RepoResult, ReviewRepository};
use fl_core::value_objects::ReviewId;

use crate::models::{ReviewModel, ReviewStatsModel};

use super::error::map_db_error;

/// Review columns plus the aggregated likes. Callers append WHERE/ORDER clauses
/// and must keep the trailing `GROUP BY r.id`.
const SELECT_REVIEWS: &str = r"
    SELECT r.id, r.customer_name, r.product_id, r.product_name, r.category, r.rating,
           r.comment, r.recommend, r.status, r.created_at, r.updated_at,
           COALESCE(
               array_agg(l.visitor_id ORDER BY l.visitor_id)
                   FILTER (WHERE l.visitor_id IS NOT NULL),
               '{}'::TEXT[]
           ) AS visitor_likes
    FROM reviews r
    LEFT JOIN review_likes l ON l.review_id = r.id
";

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn into_reviews(rows: Vec<ReviewModel>) -> RepoResult<Vec<Review>> {
        rows.into_iter().map(Review::try_from).collect()
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn create(&self, review: &Review) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reviews (id, customer_name, product_id, product_name, category, rating,
                                 comment, recommend, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(review.id.into_inner())
        .bind(&review.customer_name)
        .bind(&review.product_id)
        .bind(&review.product_name)
        .bind(&review.category)
        .bind(i16::from(review.rating.stars()))
        .bind(&review.comment)
        .bind(review.recommend)
        .bind(review.status.as_str())
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        let query = format!("{SELECT_REVIEWS} WHERE r.id = $1 GROUP BY r.id");
        let result = sqlx::query_as::<_, ReviewModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let query = format!("{SELECT_REVIEWS} GROUP BY r.id ORDER BY r.created_at DESC");
        let rows = sqlx::query_as::<_, ReviewModel>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Self::into_reviews(rows)
    }

    #[instrument(skip(self))]
    async fn find_approved(&self, order: RatingOrder, limit: usize) -> RepoResult<Vec<Review>> {
        let direction = match order {
            RatingOrder::Highest => "DESC",
            RatingOrder::Lowest => "ASC",
        };
        let query = format!(
            "{SELECT_REVIEWS} WHERE r.status = $1 GROUP BY r.id \
             ORDER BY r.rating {direction}, r.created_at DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, ReviewModel>(&query)
            .bind(ReviewStatus::Approved.as_str())
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Self::into_reviews(rows)
    }

    #[instrument(skip(self))]
    async fn approved_stats(&self) -> RepoResult<ReviewStats> {
        let stats = sqlx::query_as::<_, ReviewStatsModel>(
            r"
            SELECT COUNT(*)::BIGINT AS total_reviews,
                   COALESCE(AVG(r.rating), 0)::DOUBLE PRECISION AS average_rating,
                   (
                       COUNT(*) FILTER (WHERE r.recommend)
                       + (
                           SELECT COUNT(*)
                           FROM review_likes l
                           JOIN reviews lr ON lr.id = l.review_id
                           WHERE lr.status = $1
                       )
                   )::BIGINT AS total_likes
            FROM reviews r
            WHERE r.status = $1
            ",
        )
        .bind(ReviewStatus::Approved.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stats.into())
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: ReviewId,
        status: ReviewStatus,
    ) -> RepoResult<Option<Review>> {
        let result = sqlx::query(
            r"
            UPDATE reviews
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn set_visitor_like(
        &self,
        id: ReviewId,
        visitor_id: &str,
        liked: bool,
    ) -> RepoResult<Option<Review>> {
        if liked {
            // The primary key makes a repeated like a no-op
            sqlx::query(
                r"
                INSERT INTO review_likes (review_id, visitor_id, created_at)
                SELECT $1, $2, NOW()
                WHERE EXISTS (SELECT 1 FROM reviews WHERE id = $1)
                ON CONFLICT (review_id, visitor_id) DO NOTHING
                ",
            )
            .bind(id.into_inner())
            .bind(visitor_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        } else {
            sqlx::query(
                r"
                DELETE FROM review_likes
                WHERE review_id = $1 AND visitor_id = $2
                ",
            )
            .bind(id.into_inner())
            .bind(visitor_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        }

        self.find_by_id(id).await
    }
}
