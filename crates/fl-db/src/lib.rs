//! # fl-db
//!
//! Persistence layer implementing the repository traits from `fl-core`.
//!
//! ## Overview
//!
//! - PostgreSQL connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `Pg*Repository` implementations
//! - `Memory*Repository` implementations for tests and database-less runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fl_common::DatabaseConfig;
//! use fl_db::{create_pool, run_schema, PgReviewRepository};
//!
//! async fn example(config: &DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     run_schema(&pool).await?;
//!     let reviews = PgReviewRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemoryProductRepository, MemoryReviewRepository, MemoryUserRepository, MemoryVisitRepository,
};
pub use pool::{create_pool, ping, run_schema, PgPool};
pub use repositories::{
    PgProductRepository, PgReviewRepository, PgUserRepository, PgVisitRepository,
};
