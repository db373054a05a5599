//! Review handlers
//!
//! Public submission and listing, visitor likes, and moderation.

use axum::{
    extract::{Query, State},
    Json,
};
use fl_service::dto::{
    AdminReviewResponse, CreateReviewRequest, LikeRequest, LikeResponse, PublicReviewsQuery,
    PublicReviewsResponse, ReviewCreatedResponse, UpdateStatusRequest,
};
use fl_service::ReviewService;

use crate::extractors::{IdPath, JsonBody};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Submit a review for moderation
///
/// POST /api/reviews
pub async fn create_review(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateReviewRequest>,
) -> ApiResult<Created<Json<ReviewCreatedResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.submit(request).await?;
    Ok(Created(Json(response)))
}

/// Storefront selection of approved reviews with aggregate stats
///
/// GET /api/reviews/public?visitorId=
pub async fn list_public_reviews(
    State(state): State<AppState>,
    query: Result<Query<PublicReviewsQuery>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<PublicReviewsResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_body(e.body_text()))?;
    let service = ReviewService::new(state.service_context());
    let response = service.list_public(query.visitor_id.as_deref()).await?;
    Ok(Json(response))
}

/// Add or remove a visitor like
///
/// PATCH /api/reviews/:id/like
pub async fn like_review(
    State(state): State<AppState>,
    IdPath(review_id): IdPath,
    JsonBody(request): JsonBody<LikeRequest>,
) -> ApiResult<Json<LikeResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service.like(&review_id, request).await?;
    Ok(Json(response))
}

/// Every review for the moderation panel, newest first
///
/// GET /api/reviews/admin
pub async fn list_reviews_for_moderation(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<AdminReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.list_for_moderation().await?;
    Ok(Json(response))
}

/// Change a review's moderation status
///
/// PATCH /api/reviews/:id/status
pub async fn update_review_status(
    State(state): State<AppState>,
    IdPath(review_id): IdPath,
    JsonBody(request): JsonBody<UpdateStatusRequest>,
) -> ApiResult<Json<AdminReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service.set_status(&review_id, request).await?;
    Ok(Json(response))
}
