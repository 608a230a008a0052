//! Key layout of the QuickBlog records in the flat key-value namespace.
//!
//! ```text
//! user:<username>            -> User record
//! user_blogs:<username>      -> JSON array of post ids
//! blog:<username>:<id>       -> Post record
//! blog_slug:<slug>           -> SlugEntry {username, blogId}
//! ```

pub const USER_PREFIX: &str = "user:";
pub const USER_POSTS_PREFIX: &str = "user_blogs:";
pub const POST_PREFIX: &str = "blog:";
pub const SLUG_PREFIX: &str = "blog_slug:";

pub fn user(username: &str) -> String {
    format!("{USER_PREFIX}{username}")
}

pub fn user_posts(username: &str) -> String {
    format!("{USER_POSTS_PREFIX}{username}")
}

pub fn post(username: &str, post_id: &str) -> String {
    format!("{POST_PREFIX}{username}:{post_id}")
}

pub fn slug(slug: &str) -> String {
    format!("{SLUG_PREFIX}{slug}")
}

/// Recover the username from a `user:<username>` key.
pub fn username_from_user_key(key: &str) -> Option<&str> {
    key.strip_prefix(USER_PREFIX).filter(|name| !name.is_empty())
}
