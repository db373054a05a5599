//! Axum extractors for request handling
//!
//! Custom extractors for client identity, JSON bodies, and path ids.

mod client;
mod path;
mod validated;

pub use client::ClientIdentity;
pub use path::IdPath;
pub use validated::{JsonBody, ValidatedJson};
