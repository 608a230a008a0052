use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a published blog post, owned by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique per author; the creation time in epoch milliseconds.
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

impl Post {
    /// Build a post from validated input.
    pub fn new(id: String, author: String, input: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            category: input.category,
            tags: input.tags,
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields of `patch` over this post and bump `updated_at`.
    ///
    /// Blank strings count as "not supplied". `tags` replaces the whole list,
    /// so an empty list clears it.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let Some(title) = non_blank(patch.title) {
            self.title = title;
        }
        if let Some(content) = non_blank(patch.content) {
            self.content = content;
        }
        if let Some(category) = non_blank(patch.category) {
            self.category = Some(category);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = now;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Input for publishing a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Partial update of a post; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Slug index entry - points a public slug at one author's post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugEntry {
    pub username: String,
    #[serde(rename = "blogId")]
    pub blog_id: String,
}

/// Result of publishing a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub id: String,
    pub slug: String,
}
