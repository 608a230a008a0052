//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod store;

pub use auth::{AuthError, PasswordService};
pub use clock::{Clock, SystemClock};
pub use store::{KeyValueStore, StoreError};
