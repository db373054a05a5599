//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;

use crate::entities::{
    AdminUser, Product, RatingOrder, Review, ReviewStats, ReviewStatus, SiteVisit,
};
use crate::error::DomainError;
use crate::value_objects::{ProductId, ReviewId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Persist a new review
    async fn create(&self, review: &Review) -> RepoResult<()>;

    /// Find review by ID, including its visitor likes
    async fn find_by_id(&self, id: ReviewId) -> RepoResult<Option<Review>>;

    /// All reviews regardless of status, newest first
    async fn find_all(&self) -> RepoResult<Vec<Review>>;

    /// Approved reviews ordered by rating, newest first among ties
    async fn find_approved(&self, order: RatingOrder, limit: usize) -> RepoResult<Vec<Review>>;

    /// Aggregate statistics over every approved review
    async fn approved_stats(&self) -> RepoResult<ReviewStats>;

    /// Set the moderation status. Returns the updated review, or `None` if absent.
    async fn update_status(&self, id: ReviewId, status: ReviewStatus)
        -> RepoResult<Option<Review>>;

    /// Atomically add (`liked = true`) or remove a visitor like.
    ///
    /// Both directions are idempotent. Returns the updated review, or `None` if absent.
    async fn set_visitor_like(
        &self,
        id: ReviewId,
        visitor_id: &str,
        liked: bool,
    ) -> RepoResult<Option<Review>>;
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, newest first
    async fn find_all(&self) -> RepoResult<Vec<Product>>;

    /// Find product by ID
    async fn find_by_id(&self, id: ProductId) -> RepoResult<Option<Product>>;

    /// Persist a new product
    async fn create(&self, product: &Product) -> RepoResult<()>;

    /// Overwrite an existing product. Returns `false` if it does not exist.
    async fn update(&self, product: &Product) -> RepoResult<bool>;

    /// Delete a product. Returns `false` if it does not exist.
    async fn delete(&self, id: ProductId) -> RepoResult<bool>;

    /// Number of products in the catalog
    async fn count(&self) -> RepoResult<u64>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find admin by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<AdminUser>>;

    /// Persist a new admin
    async fn create(&self, user: &AdminUser) -> RepoResult<()>;

    /// Number of admins
    async fn count(&self) -> RepoResult<u64>;
}

// ============================================================================
// Visit Repository
// ============================================================================

#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Upsert the visit for `(visitor_id, day_key)`.
    ///
    /// Returns `true` when this is the visitor's first visit of the day.
    async fn record_visit(&self, visit: &SiteVisit) -> RepoResult<bool>;

    /// Atomically add one to a site metric and return the new value
    async fn increment_metric(&self, key: &str) -> RepoResult<u64>;

    /// Current value of a site metric (0 if never set)
    async fn metric(&self, key: &str) -> RepoResult<u64>;

    /// Distinct visitors recorded for a day
    async fn count_visitors(&self, day_key: &str) -> RepoResult<u64>;
}
