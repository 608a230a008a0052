//! Key-value store implementations - Redis and in-memory fallback.

mod memory;

#[cfg(feature = "redis")]
mod redis_store;

pub use memory::InMemoryStore;

#[cfg(feature = "redis")]
pub use redis_store::{RedisConfig, RedisStore};
