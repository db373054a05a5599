//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` and are emitted as camelCase JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Review Responses
// ============================================================================

/// Review as shown on the storefront
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: String,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub rating: u8,
    pub comment: String,
    pub recommend: bool,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub liked_by_visitor: bool,
}

/// Review as shown to moderators
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReviewResponse {
    pub id: String,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub rating: u8,
    pub comment: String,
    pub recommend: bool,
    pub visitor_likes: Vec<String>,
    pub like_count: u64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatsResponse {
    pub total_reviews: u64,
    pub average_rating: f64,
    pub total_likes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
    pub stats: ReviewStatsResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCreatedResponse {
    pub message: String,
    pub review: AdminReviewResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub review_id: String,
    pub like_count: u64,
    pub liked_by_visitor: bool,
}

// ============================================================================
// Product Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub is_new: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Misc Responses
// ============================================================================

/// Plain `{ "message": ... }` body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitResponse {
    /// Whether this was the visitor's first visit today
    pub counted: bool,
    pub total_visits: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatsResponse {
    pub total_visits: u64,
    pub today_visitors: u64,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of probing one dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
    /// Not configured, so not probed
    Disabled,
}

impl CheckStatus {
    /// `None` means the dependency is not configured
    pub fn from_probe(probe: Option<bool>) -> Self {
        match probe {
            Some(true) => Self::Healthy,
            Some(false) => Self::Unhealthy,
            None => Self::Disabled,
        }
    }

    pub fn is_ok(self) -> bool {
        self != Self::Unhealthy
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub redis: CheckStatus,
}

impl ReadinessResponse {
    pub fn ready(database: CheckStatus, redis: CheckStatus) -> Self {
        Self {
            status: if database.is_ok() && redis.is_ok() {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database.is_ok() && self.checks.redis.is_ok()
    }
}
