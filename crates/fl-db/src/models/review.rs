//! Review database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A `reviews` row joined with its aggregated `review_likes`
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: Uuid,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub rating: i16,
    pub comment: String,
    pub recommend: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub visitor_likes: Vec<String>,
}

/// Aggregates over approved reviews
#[derive(Debug, Clone, FromRow)]
pub struct ReviewStatsModel {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub total_likes: i64,
}
