//! Review service
//!
//! Public submission, storefront listing, visitor likes and moderation.

use std::collections::HashSet;
use tracing::{info, instrument};

use fl_core::entities::{RatingOrder, Review, ReviewStatus};
use fl_core::value_objects::ReviewId;
use fl_core::DomainError;

use crate::dto::{
    AdminReviewResponse, CreateReviewRequest, LikeRequest, LikeResponse, PublicReviewsResponse,
    ReviewCreatedResponse, ReviewResponse, UpdateStatusRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reviews taken from each end of the rating scale for the storefront
const PUBLIC_SLOT_SIZE: usize = 2;

const PENDING_MODERATION_MESSAGE: &str =
    "¡Gracias por tu reseña! Será publicada una vez que sea aprobada.";

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store a new pending review, then queue a moderation alert
    #[instrument(skip(self, request))]
    pub async fn submit(&self, request: CreateReviewRequest) -> ServiceResult<ReviewCreatedResponse> {
        let draft = request.into_draft()?;
        let review = Review::new(ReviewId::generate(), draft);

        self.ctx.review_repo().create(&review).await?;
        info!(review_id = %review.id, rating = %review.rating, "Review submitted");

        self.ctx.notifier().notify_new_review(&review);

        Ok(ReviewCreatedResponse {
            message: PENDING_MODERATION_MESSAGE.to_string(),
            review: AdminReviewResponse::from(&review),
        })
    }

    /// Best and worst approved reviews plus stats over every approved review
    #[instrument(skip(self))]
    pub async fn list_public(&self, visitor_id: Option<&str>) -> ServiceResult<PublicReviewsResponse> {
        let visitor_id = visitor_id.map(str::trim).filter(|v| !v.is_empty());
        let repo = self.ctx.review_repo();

        let top = repo
            .find_approved(RatingOrder::Highest, PUBLIC_SLOT_SIZE)
            .await?;
        let bottom = repo
            .find_approved(RatingOrder::Lowest, PUBLIC_SLOT_SIZE)
            .await?;
        let stats = repo.approved_stats().await?;

        let mut seen = HashSet::new();
        let reviews = top
            .iter()
            .chain(bottom.iter())
            .filter(|review| seen.insert(review.id))
            .map(|review| ReviewResponse::for_visitor(review, visitor_id))
            .collect();

        Ok(PublicReviewsResponse {
            reviews,
            stats: stats.into(),
        })
    }

    /// Add or remove a visitor like. Both directions are idempotent.
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        review_id: ReviewId,
        visitor_id: &str,
        liked: bool,
    ) -> ServiceResult<LikeResponse> {
        let review = self
            .ctx
            .review_repo()
            .set_visitor_like(review_id, visitor_id, liked)
            .await?
            .ok_or_else(|| DomainError::ReviewNotFound(review_id.to_string()))?;

        Ok(LikeResponse::for_visitor(&review, visitor_id))
    }

    /// Like toggle as requested by a visitor, subject to the per-pair cooldown
    #[instrument(skip(self, request))]
    pub async fn like(&self, review_id: &str, request: LikeRequest) -> ServiceResult<LikeResponse> {
        let liked = request.wants_like();
        let visitor_id = request
            .visitor_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(DomainError::MissingVisitorId)?;
        let review_id = parse_review_id(review_id)?;

        // Unknown reviews never take a cooldown slot
        if self.ctx.review_repo().find_by_id(review_id).await?.is_none() {
            return Err(DomainError::ReviewNotFound(review_id.to_string()).into());
        }

        self.ctx
            .like_cooldown()
            .check_and_record(review_id, visitor_id)
            .await?;

        let response = self.toggle_like(review_id, visitor_id, liked).await?;
        info!(
            review_id = %review_id,
            liked,
            like_count = response.like_count,
            "Review like updated"
        );
        Ok(response)
    }

    /// Every review regardless of status, newest first
    #[instrument(skip(self))]
    pub async fn list_for_moderation(&self) -> ServiceResult<Vec<AdminReviewResponse>> {
        let reviews = self.ctx.review_repo().find_all().await?;
        Ok(reviews.iter().map(AdminReviewResponse::from).collect())
    }

    /// Move a review to any status. There are no transition restrictions.
    #[instrument(skip(self, request))]
    pub async fn set_status(
        &self,
        review_id: &str,
        request: UpdateStatusRequest,
    ) -> ServiceResult<AdminReviewResponse> {
        let status: ReviewStatus = request.status.unwrap_or_default().parse()?;
        let id = parse_review_id(review_id)?;

        let review = self
            .ctx
            .review_repo()
            .update_status(id, status)
            .await?
            .ok_or_else(|| DomainError::ReviewNotFound(review_id.to_string()))?;

        info!(review_id = %id, status = %status, "Review status updated");
        Ok(AdminReviewResponse::from(&review))
    }
}

/// An id that does not parse cannot name an existing review
fn parse_review_id(raw: &str) -> Result<ReviewId, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::ReviewNotFound(raw.to_string()))
}
