//! # fl-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! store ports used by the anti-abuse subsystem.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminUser, Product, ProductDraft, RatingOrder, Review, ReviewDraft, ReviewStats,
    ReviewStatus, SiteVisit, TOTAL_VISITS_METRIC,
};
pub use error::DomainError;
pub use traits::{
    BlobStore, CooldownState, CooldownStore, ProductRepository, RateLimitStore, RepoResult,
    ReviewRepository, UserRepository, VisitRepository, WindowState,
};
pub use value_objects::{IdParseError, ProductId, Rating, ReviewId};
