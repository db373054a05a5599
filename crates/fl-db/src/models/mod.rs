//! Database models - SQLx-compatible structs for PostgreSQL tables

mod product;
mod review;
mod user;

pub use product::ProductModel;
pub use review::{ReviewModel, ReviewStatsModel};
pub use user::AdminUserModel;
