//! Authentication implementations.

mod password;

pub use password::{Argon2Config, Argon2PasswordService};
