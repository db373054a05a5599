//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in fl-core.

mod error;
mod product;
mod review;
mod user;
mod visit;

pub use product::PgProductRepository;
pub use review::PgReviewRepository;
pub use user::PgUserRepository;
pub use visit::PgVisitRepository;
