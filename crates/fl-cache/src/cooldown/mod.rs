//! Per-key action cooldowns

mod memory;
mod redis_store;

pub use memory::MemoryCooldownStore;
pub use redis_store::RedisCooldownStore;
