//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields default to empty so a missing field reaches validation
//! instead of failing JSON extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request to publish a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Partial update of a post; absent fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Title availability query. Either field may be sent; `title` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckTitleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "normalizedTitle",
        skip_serializing_if = "Option::is_none"
    )]
    pub normalized_title: Option<String>,
}

impl CheckTitleRequest {
    pub fn candidate(&self) -> &str {
        self.title
            .as_deref()
            .or(self.normalized_title.as_deref())
            .unwrap_or_default()
    }
}

/// A post as the client sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login result - the username doubles as the client-side session identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub username: String,
}

/// Result of publishing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPost {
    #[serde(rename = "blogId")]
    pub blog_id: String,
    #[serde(rename = "shareableLink")]
    pub shareable_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostList {
    pub blogs: Vec<PostView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub blog: PostView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleAvailability {
    pub available: bool,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub redis: String,
}
