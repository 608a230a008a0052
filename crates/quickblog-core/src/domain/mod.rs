//! Domain entities - the core business objects.

mod post;
mod slug;
mod user;
pub mod validation;

pub use post::{NewPost, Post, PostPatch, PublishedPost, SlugEntry};
pub use slug::{normalize_title, post_slug, slugify};
pub use user::User;
