//! # QuickBlog Core
//!
//! The domain layer of QuickBlog: users, posts and the slug index, the
//! key layout that maps them onto a flat key-value store, and the
//! data-access service that enforces their invariants.
//! Infrastructure (Redis, Argon2) plugs in through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod keys;
pub mod ports;
pub mod service;

pub use error::{DomainError, DomainResult};
pub use service::BlogService;
