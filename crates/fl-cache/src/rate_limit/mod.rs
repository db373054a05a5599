//! Fixed-window request counters

mod memory;
mod redis_store;

pub use memory::MemoryRateLimitStore;
pub use redis_store::RedisRateLimitStore;
