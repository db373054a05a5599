//! Service context - dependency container for services
//!
//! Holds the repositories, anti-abuse guards, blob store and notification
//! queue needed by services.

use std::sync::Arc;
use std::time::Duration;

use fl_cache::{MemoryCooldownStore, MemoryRateLimitStore, RedisPool};
use fl_common::RateLimitConfig;
use fl_core::traits::{
    BlobStore, CooldownStore, ProductRepository, RateLimitStore, ReviewRepository, UserRepository,
    VisitRepository,
};
use fl_db::{
    MemoryProductRepository, MemoryReviewRepository, MemoryUserRepository, MemoryVisitRepository,
    PgPool,
};

use super::cooldown::LikeCooldownTracker;
use super::error::{ServiceError, ServiceResult};
use super::notifier::ReviewNotifier;
use super::rate_limit::RateLimiter;

const DEFAULT_LIKE_COOLDOWN: Duration = Duration::from_secs(15);

/// Service context containing all dependencies
///
/// Cloning is cheap: every dependency sits behind an `Arc` or is itself a
/// shared handle.
#[derive(Clone)]
pub struct ServiceContext {
    // Connection pools, absent when running on in-memory stores
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    // Repositories
    review_repo: Arc<dyn ReviewRepository>,
    product_repo: Arc<dyn ProductRepository>,
    user_repo: Arc<dyn UserRepository>,
    visit_repo: Arc<dyn VisitRepository>,

    // Collaborators
    blob_store: Arc<dyn BlobStore>,
    notifier: ReviewNotifier,

    // Anti-abuse guards
    rate_limiter: Arc<RateLimiter>,
    like_cooldown: Arc<LikeCooldownTracker>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Pools ===

    /// PostgreSQL pool, if persistence is database-backed
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Redis pool, if anti-abuse state is shared
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn product_repo(&self) -> &dyn ProductRepository {
        self.product_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn visit_repo(&self) -> &dyn VisitRepository {
        self.visit_repo.as_ref()
    }

    // === Collaborators ===

    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    pub fn notifier(&self) -> &ReviewNotifier {
        &self.notifier
    }

    // === Guards ===

    pub fn rate_limiter(&self) -> &RateLimiter {
        self.rate_limiter.as_ref()
    }

    pub fn like_cooldown(&self) -> &LikeCooldownTracker {
        self.like_cooldown.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("rate_limiter", &self.rate_limiter)
            .field("like_cooldown", &self.like_cooldown)
            .field("notifier", &self.notifier)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Rate-limit windows and cooldowns default to in-memory stores and the
/// notifier defaults to disabled.
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    product_repo: Option<Arc<dyn ProductRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    visit_repo: Option<Arc<dyn VisitRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    notifier: Option<ReviewNotifier>,
    rate_limit_store: Option<Arc<dyn RateLimitStore>>,
    cooldown_store: Option<Arc<dyn CooldownStore>>,
    rate_limit: RateLimitConfig,
    like_cooldown: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            review_repo: None,
            product_repo: None,
            user_repo: None,
            visit_repo: None,
            blob_store: None,
            notifier: None,
            rate_limit_store: None,
            cooldown_store: None,
            rate_limit: RateLimitConfig::default(),
            like_cooldown: DEFAULT_LIKE_COOLDOWN,
        }
    }

    /// Use in-memory repositories for everything not set explicitly
    pub fn in_memory(mut self) -> Self {
        self.review_repo
            .get_or_insert_with(|| Arc::new(MemoryReviewRepository::new()));
        self.product_repo
            .get_or_insert_with(|| Arc::new(MemoryProductRepository::new()));
        self.user_repo
            .get_or_insert_with(|| Arc::new(MemoryUserRepository::new()));
        self.visit_repo
            .get_or_insert_with(|| Arc::new(MemoryVisitRepository::new()));
        self
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn product_repo(mut self, repo: Arc<dyn ProductRepository>) -> Self {
        self.product_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn visit_repo(mut self, repo: Arc<dyn VisitRepository>) -> Self {
        self.visit_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: ReviewNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn rate_limit_store(mut self, store: Arc<dyn RateLimitStore>) -> Self {
        self.rate_limit_store = Some(store);
        self
    }

    pub fn cooldown_store(mut self, store: Arc<dyn CooldownStore>) -> Self {
        self.cooldown_store = Some(store);
        self
    }

    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    pub fn like_cooldown(mut self, interval: Duration) -> Self {
        self.like_cooldown = interval;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository or the blob store is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let rate_limit_store = self
            .rate_limit_store
            .unwrap_or_else(|| Arc::new(MemoryRateLimitStore::new()));
        let cooldown_store = self
            .cooldown_store
            .unwrap_or_else(|| Arc::new(MemoryCooldownStore::new()));

        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            review_repo: self
                .review_repo
                .ok_or_else(|| ServiceError::validation("review_repo is required"))?,
            product_repo: self
                .product_repo
                .ok_or_else(|| ServiceError::validation("product_repo is required"))?,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            visit_repo: self
                .visit_repo
                .ok_or_else(|| ServiceError::validation("visit_repo is required"))?,
            blob_store: self
                .blob_store
                .ok_or_else(|| ServiceError::validation("blob_store is required"))?,
            notifier: self.notifier.unwrap_or_else(ReviewNotifier::disabled),
            rate_limiter: Arc::new(RateLimiter::new(rate_limit_store, self.rate_limit)),
            like_cooldown: Arc::new(LikeCooldownTracker::new(cooldown_store, self.like_cooldown)),
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
