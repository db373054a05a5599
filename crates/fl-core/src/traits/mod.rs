//! Ports implemented by the infrastructure crates

mod repositories;
mod stores;

pub use repositories::{
    ProductRepository, RepoResult, ReviewRepository, UserRepository, VisitRepository,
};
pub use stores::{BlobStore, CooldownState, CooldownStore, RateLimitStore, WindowState};
