//! In-memory ReviewRepository

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use fl_core::entities::{RatingOrder, Review, ReviewStats, ReviewStatus};
use fl_core::traits::{RepoResult, ReviewRepository};
use fl_core::value_objects::ReviewId;

/// Review store backed by a `HashMap` behind a lock
#[derive(Debug, Default)]
pub struct MemoryReviewRepository {
    reviews: RwLock<HashMap<ReviewId, Review>>,
}

impl MemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn create(&self, review: &Review) -> RepoResult<()> {
        self.reviews.write().insert(review.id, review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>> {
        Ok(self.reviews.read().get(&id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self.reviews.read().values().cloned().collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn find_approved(&self, order: RatingOrder, limit: usize) -> RepoResult<Vec<Review>> {
        let mut approved: Vec<Review> = self
            .reviews
            .read()
            .values()
            .filter(|r| r.status.is_public())
            .cloned()
            .collect();
        approved.sort_by(|a, b| order.compare(a, b));
        approved.truncate(limit);
        Ok(approved)
    }

    async fn approved_stats(&self) -> RepoResult<ReviewStats> {
        let reviews = self.reviews.read();
        Ok(ReviewStats::from_reviews(
            reviews.values().filter(|r| r.status.is_public()),
        ))
    }

    async fn update_status(
        &self,
        id: ReviewId,
        status: ReviewStatus,
    ) -> RepoResult<Option<Review>> {
        let mut reviews = self.reviews.write();
        Ok(reviews.get_mut(&id).map(|review| {
            review.status = status;
            review.updated_at = Utc::now();
            review.clone()
        }))
    }

    async fn set_visitor_like(
        &self,
        id: ReviewId,
        visitor_id: &str,
        liked: bool,
    ) -> RepoResult<Option<Review>> {
        let mut reviews = self.reviews.write();
        Ok(reviews.get_mut(&id).map(|review| {
            if liked {
                review.add_like(visitor_id);
            } else {
                review.remove_like(visitor_id);
            }
            review.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fl_core::entities::ReviewDraft;
    use fl_core::value_objects::Rating;
    use std::sync::Arc;

    fn review(stars: u8, status: ReviewStatus, age_minutes: i64) -> Review {
        let mut review = Review::new(
            ReviewId::generate(),
            ReviewDraft {
                customer_name: "Ana".to_string(),
                product_id: "p-1".to_string(),
                product_name: "Producto Premium 1".to_string(),
                category: "Tecnología".to_string(),
                rating: Rating::new(stars).unwrap(),
                comment: "Muy bueno".to_string(),
                recommend: false,
            },
        );
        review.status = status;
        review.created_at -= Duration::minutes(age_minutes);
        review
    }

    #[tokio::test]
    async fn test_find_approved_orders_and_limits() {
        let repo = MemoryReviewRepository::new();
        let old_five = review(5, ReviewStatus::Approved, 30);
        let new_five = review(5, ReviewStatus::Approved, 1);
        let four = review(4, ReviewStatus::Approved, 0);
        let pending_five = review(5, ReviewStatus::Pending, 0);
        for r in [&old_five, &new_five, &four, &pending_five] {
            repo.create(r).await.unwrap();
        }

        let top = repo.find_approved(RatingOrder::Highest, 2).await.unwrap();
        assert_eq!(
            top.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![new_five.id, old_five.id]
        );

        let bottom = repo.find_approved(RatingOrder::Lowest, 1).await.unwrap();
        assert_eq!(bottom[0].id, four.id);
    }

    #[tokio::test]
    async fn test_set_visitor_like_is_idempotent() {
        let repo = MemoryReviewRepository::new();
        let r = review(4, ReviewStatus::Approved, 0);
        repo.create(&r).await.unwrap();

        repo.set_visitor_like(r.id, "v1", true).await.unwrap();
        let liked = repo.set_visitor_like(r.id, "v1", true).await.unwrap().unwrap();
        assert_eq!(liked.visitor_likes.len(), 1);

        let unliked = repo.set_visitor_like(r.id, "v1", false).await.unwrap().unwrap();
        assert!(unliked.visitor_likes.is_empty());
        let unliked = repo.set_visitor_like(r.id, "v1", false).await.unwrap().unwrap();
        assert!(unliked.visitor_likes.is_empty());

        let missing = repo
            .set_visitor_like(ReviewId::generate(), "v1", true)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes_are_all_kept() {
        let repo = Arc::new(MemoryReviewRepository::new());
        let mut r = review(5, ReviewStatus::Approved, 0);
        r.recommend = true;
        repo.create(&r).await.unwrap();

        let id = r.id;
        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.set_visitor_like(id, &format!("v{i}"), true).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.visitor_likes.len(), 50);
        assert_eq!(found.like_count(), 51);
    }

    #[tokio::test]
    async fn test_stats_only_count_approved() {
        let repo = MemoryReviewRepository::new();
        repo.create(&review(5, ReviewStatus::Approved, 0)).await.unwrap();
        repo.create(&review(2, ReviewStatus::Approved, 0)).await.unwrap();
        repo.create(&review(1, ReviewStatus::Rejected, 0)).await.unwrap();

        let stats = repo.approved_stats().await.unwrap();
        assert_eq!(stats.total_reviews, 2);
        assert!((stats.average_rating - 3.5).abs() < f64::EPSILON);
    }
}
