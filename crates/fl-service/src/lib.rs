//! # fl-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    seed, Admission, AuthService, LikeCooldownTracker, LocalBlobStore, MailTransport, NotificationWorker,
    ProductService, RateLimiter, ReviewAlert, ReviewNotifier, ReviewService, RouteClass,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, SmtpMailTransport,
    UploadService, VisitService,
};
