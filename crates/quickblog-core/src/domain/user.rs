use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - a registered author.
///
/// Created on registration and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key. Older records only carry it in their key, so it is
    /// optional on the wire and `authenticate` fills it in from the key.
    #[serde(default)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            username,
            password_hash,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_record_without_username() {
        let raw = r#"{"password_hash":"$argon2id$x","created_at":"2024-05-01T10:00:00.000Z"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert!(user.username.is_empty());
        assert_eq!(user.password_hash, "$argon2id$x");
    }
}
