//! Business logic services
//!
//! Service layer implementations that handle validation and orchestration of
//! domain operations, plus the anti-abuse guards that front them.

pub mod auth;
pub mod bootstrap;
pub mod context;
pub mod cooldown;
pub mod error;
pub mod notifier;
pub mod product;
pub mod rate_limit;
pub mod review;
pub mod upload;
pub mod visit;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use bootstrap::seed;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use cooldown::LikeCooldownTracker;
pub use error::{ServiceError, ServiceResult};
pub use notifier::{
    MailError, MailTransport, NotificationWorker, ReviewAlert, ReviewNotifier, SmtpMailTransport,
    NOTIFICATION_QUEUE_CAPACITY,
};
pub use product::ProductService;
pub use rate_limit::{Admission, RateLimiter, RouteClass};
pub use review::ReviewService;
pub use upload::{LocalBlobStore, UploadService};
pub use visit::VisitService;
