//! Review model -> entity mapper

use fl_core::entities::{Review, ReviewStats};
use fl_core::error::DomainError;
use fl_core::value_objects::{Rating, ReviewId};

use crate::models::{ReviewModel, ReviewStatsModel};

impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        let rating = u8::try_from(model.rating)
            .map_err(|_| DomainError::InvalidRating)
            .and_then(Rating::new)
            .map_err(|_| {
                DomainError::DatabaseError(format!(
                    "review {} has invalid rating {}",
                    model.id, model.rating
                ))
            })?;
        let status = model.status.parse().map_err(|_| {
            DomainError::DatabaseError(format!(
                "review {} has invalid status {}",
                model.id, model.status
            ))
        })?;

        Ok(Review {
            id: ReviewId::from_uuid(model.id),
            customer_name: model.customer_name,
            product_id: model.product_id,
            product_name: model.product_name,
            category: model.category,
            rating,
            comment: model.comment,
            recommend: model.recommend,
            visitor_likes: model.visitor_likes.into_iter().collect(),
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<ReviewStatsModel> for ReviewStats {
    fn from(model: ReviewStatsModel) -> Self {
        ReviewStats {
            total_reviews: model.total_reviews.max(0) as u64,
            average_rating: model.average_rating,
            total_likes: model.total_likes.max(0) as u64,
        }
    }
}
