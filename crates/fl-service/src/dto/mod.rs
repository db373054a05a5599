//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs, loosely typed where the public forms send loose data
//! - Response DTOs serialized as camelCase JSON
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateReviewRequest, LikeRequest, LoginRequest, ProductRequest, PublicReviewsQuery,
    UpdateStatusRequest, VisitRequest,
};

// Re-export commonly used response types
pub use responses::{
    AdminReviewResponse, CheckStatus, HealthChecks, HealthResponse, LikeResponse,
    LoginResponse, MessageResponse, ProductResponse, PublicReviewsResponse, ReadinessResponse,
    ReviewCreatedResponse, ReviewResponse, ReviewStatsResponse, UploadResponse, VisitResponse,
    VisitStatsResponse,
};
