//! Integration test utilities for the FL Store API
//!
//! Spawns the full HTTP stack on an ephemeral port with in-memory storage
//! and talks to it over real HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
