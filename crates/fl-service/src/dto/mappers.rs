//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use fl_core::entities::{Product, Review, ReviewStats};

use super::responses::{
    AdminReviewResponse, LikeResponse, ProductResponse, ReviewResponse, ReviewStatsResponse,
};

// ============================================================================
// Review Mappers
// ============================================================================

impl ReviewResponse {
    /// Storefront view of `review` for an optional visitor
    pub fn for_visitor(review: &Review, visitor_id: Option<&str>) -> Self {
        Self {
            id: review.id.to_string(),
            customer_name: review.customer_name.clone(),
            product_id: review.product_id.clone(),
            product_name: review.product_name.clone(),
            category: review.category.clone(),
            rating: review.rating.stars(),
            comment: review.comment.clone(),
            recommend: review.recommend,
            created_at: review.created_at,
            like_count: review.like_count(),
            liked_by_visitor: visitor_id.is_some_and(|v| review.is_liked_by(v)),
        }
    }
}

impl From<&Review> for AdminReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.to_string(),
            customer_name: review.customer_name.clone(),
            product_id: review.product_id.clone(),
            product_name: review.product_name.clone(),
            category: review.category.clone(),
            rating: review.rating.stars(),
            comment: review.comment.clone(),
            recommend: review.recommend,
            visitor_likes: review.visitor_likes.iter().cloned().collect(),
            like_count: review.like_count(),
            status: review.status.to_string(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl From<Review> for AdminReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

impl From<ReviewStats> for ReviewStatsResponse {
    fn from(stats: ReviewStats) -> Self {
        Self {
            total_reviews: stats.total_reviews,
            average_rating: stats.average_rating,
            total_likes: stats.total_likes,
        }
    }
}

impl LikeResponse {
    pub fn for_visitor(review: &Review, visitor_id: &str) -> Self {
        Self {
            review_id: review.id.to_string(),
            like_count: review.like_count(),
            liked_by_visitor: review.is_liked_by(visitor_id),
        }
    }
}

// ============================================================================
// Product Mappers
// ============================================================================

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            is_new: product.is_new,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_core::entities::ReviewDraft;
    use fl_core::value_objects::{Rating, ReviewId};

    fn review() -> Review {
        let mut review = Review::new(
            ReviewId::generate(),
            ReviewDraft {
                customer_name: "Ana".to_string(),
                product_id: "p-1".to_string(),
                product_name: "Lámpara".to_string(),
                category: "Hogar".to_string(),
                rating: Rating::new(5).unwrap(),
                comment: "Excelente".to_string(),
                recommend: true,
            },
        );
        review.add_like("v1");
        review
    }

    #[test]
    fn test_public_review_counts_recommendation() {
        let review = review();
        let response = ReviewResponse::for_visitor(&review, Some("v1"));
        assert_eq!(response.like_count, 2);
        assert!(response.liked_by_visitor);

        let anonymous = ReviewResponse::for_visitor(&review, None);
        assert!(!anonymous.liked_by_visitor);
    }

    #[test]
    fn test_admin_review_exposes_status_and_likes() {
        let response = AdminReviewResponse::from(review());
        assert_eq!(response.status, "pending");
        assert_eq!(response.visitor_likes, vec!["v1".to_string()]);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("visitorLikes").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
