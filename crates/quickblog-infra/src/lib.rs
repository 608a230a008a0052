//! # QuickBlog Infrastructure
//!
//! Concrete implementations of the ports defined in `quickblog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `auth` - Argon2 password hashing
//! - `redis` - Redis-backed key-value store

pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use store::InMemoryStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2Config, Argon2PasswordService};

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use store::{RedisConfig, RedisStore};
