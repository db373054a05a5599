//! In-memory repository implementations
//!
//! Used by tests and when no `DATABASE_URL` is configured. Data lives for the
//! lifetime of the process.

mod product;
mod review;
mod user;
mod visit;

pub use product::MemoryProductRepository;
pub use review::MemoryReviewRepository;
pub use user::MemoryUserRepository;
pub use visit::MemoryVisitRepository;
