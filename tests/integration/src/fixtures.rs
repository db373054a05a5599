//! Test fixtures and data generators
//!
//! Provides reusable request bodies and typed views of API responses.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Review submission body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub rating: u8,
    pub comment: String,
    pub recommend: bool,
}

impl CreateReviewRequest {
    pub fn unique(rating: u8) -> Self {
        let suffix = unique_suffix();
        Self {
            customer_name: format!("Cliente {suffix}"),
            product_id: format!("prod-{suffix}"),
            product_name: "Vestido Floral".to_string(),
            category: "vestidos".to_string(),
            rating,
            comment: "Me encantó la tela".to_string(),
            recommend: false,
        }
    }
}

/// Moderation view of a review
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReview {
    pub id: String,
    pub customer_name: String,
    pub rating: u8,
    pub status: String,
    pub like_count: u64,
    pub visitor_likes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewCreated {
    pub message: String,
    pub review: AdminReview,
}

/// Public view of a review
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReview {
    pub id: String,
    pub rating: u8,
    pub like_count: u64,
    pub liked_by_visitor: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: u64,
    pub average_rating: f64,
    pub total_likes: u64,
}

#[derive(Debug, Deserialize)]
pub struct PublicReviews {
    pub reviews: Vec<PublicReview>,
    pub stats: ReviewStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResult {
    pub review_id: String,
    pub like_count: u64,
    pub liked_by_visitor: bool,
}

/// Product body for create and replace
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub is_new: bool,
}

impl ProductRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Blusa {suffix}"),
            description: "Blusa de lino".to_string(),
            price: 32.5,
            image: "https://example.com/blusa.jpg".to_string(),
            category: "blusas".to_string(),
            is_new: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub is_new: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResult {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStats {
    pub total_visits: u64,
    pub today_visitors: u64,
}

/// Error envelope returned by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
