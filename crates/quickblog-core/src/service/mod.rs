//! Data-access layer - encodes users, posts and slugs into key-value records.
//!
//! Every operation is a short sequence of store round-trips. None of them is
//! atomic: a failure halfway through a multi-key write can leave the post list
//! or the slug index out of step with the post records, and nothing repairs it.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::validation::{normalize_tags, validate_content, validate_title};
use crate::domain::{
    NewPost, Post, PostPatch, PublishedPost, SlugEntry, User, normalize_title, post_slug,
};
use crate::error::{DomainError, DomainResult};
use crate::keys;
use crate::ports::{Clock, KeyValueStore, PasswordService, SystemClock};

#[cfg(test)]
mod tests;

/// The QuickBlog data-access service.
#[derive(Clone)]
pub struct BlogService {
    store: Arc<dyn KeyValueStore>,
    passwords: Arc<dyn PasswordService>,
    clock: Arc<dyn Clock>,
}

impl BlogService {
    pub fn new(store: Arc<dyn KeyValueStore>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            store,
            passwords,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock, e.g. with a fixed one in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a new user with an empty post list.
    ///
    /// The existence check and the write are separate round-trips, so two
    /// concurrent registrations of one name can both succeed.
    pub async fn register_user(&self, username: &str, password: &str) -> DomainResult<()> {
        validate_username(username)?;
        if password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        let user_key = keys::user(username);
        if self.store.exists(&user_key).await? {
            return Err(DomainError::Conflict("User already exists".to_string()));
        }

        let password_hash = self.passwords.hash(password)?;
        let user = User::new(username.to_string(), password_hash, self.clock.now());

        self.save(&user_key, &user).await?;
        self.save(&keys::user_posts(username), &Vec::<String>::new())
            .await?;

        tracing::info!(username = %username, "User registered");
        Ok(())
    }

    /// Check credentials and return the username as the session identity.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<String> {
        let Some(mut user) = self.load::<User>(&keys::user(username)).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(DomainError::Unauthorized);
        };

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(username = %username, "Login with wrong password");
            return Err(DomainError::Unauthorized);
        }

        if user.username.is_empty() {
            user.username = username.to_string();
        }
        Ok(user.username)
    }

    /// Publish a post: post record, slug index entry, then the author's post list.
    pub async fn create_post(&self, author: &str, input: NewPost) -> DomainResult<PublishedPost> {
        if author.trim().is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        validate_title(&input.title)?;
        validate_content(&input.content)?;
        let input = NewPost {
            tags: normalize_tags(input.tags)?,
            category: input.category.filter(|c| !c.trim().is_empty()),
            ..input
        };

        if !self.store.exists(&keys::user(author)).await? {
            return Err(DomainError::not_found("User", author));
        }

        let now = self.clock.now();
        let id = self.next_post_id(author, now.timestamp_millis()).await?;
        let slug = post_slug(&input.title, &id);
        let post = Post::new(id.clone(), author.to_string(), input, now);

        self.save(&keys::post(author, &id), &post).await?;
        self.save(
            &keys::slug(&slug),
            &SlugEntry {
                username: author.to_string(),
                blog_id: id.clone(),
            },
        )
        .await?;

        let list_key = keys::user_posts(author);
        let mut ids = self.load::<Vec<String>>(&list_key).await?.unwrap_or_default();
        ids.push(id.clone());
        self.save(&list_key, &ids).await?;

        tracing::info!(author = %author, post_id = %id, slug = %slug, "Post published");
        Ok(PublishedPost { id, slug })
    }

    /// All posts referenced by the author's post list, in list order.
    ///
    /// Ids whose record is missing or unreadable are skipped.
    pub async fn list_posts(&self, author: &str) -> DomainResult<Vec<Post>> {
        let ids = self
            .load::<Vec<String>>(&keys::user_posts(author))
            .await?
            .unwrap_or_default();

        let mut posts = Vec::with_capacity(ids.len());
        for id in ids {
            let key = keys::post(author, &id);
            match self.load::<Post>(&key).await {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!(key = %key, "Post list references missing post"),
                Err(DomainError::CorruptRecord { key, reason }) => {
                    tracing::warn!(key = %key, reason = %reason, "Skipping unreadable post");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(posts)
    }

    /// Every post of every registered author, newest first.
    ///
    /// Authors are discovered by scanning `user:` keys.
    pub async fn list_all_posts(&self) -> DomainResult<Vec<Post>> {
        let mut authors: Vec<String> = self
            .store
            .scan_prefix(keys::USER_PREFIX)
            .await?
            .iter()
            .filter_map(|key| keys::username_from_user_key(key))
            .map(str::to_string)
            .collect();
        authors.sort();

        let mut posts = Vec::new();
        for author in &authors {
            match self.list_posts(author).await {
                Ok(mut found) => posts.append(&mut found),
                Err(DomainError::CorruptRecord { key, reason }) => {
                    tracing::warn!(key = %key, reason = %reason, "Skipping unreadable post list");
                }
                Err(e) => return Err(e),
            }
        }

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Fetch one post by author and id.
    pub async fn get_post(&self, author: &str, post_id: &str) -> DomainResult<Post> {
        let key = keys::post(author, post_id);
        match self.load::<Post>(&key).await? {
            Some(post) => Ok(post),
            None => Err(DomainError::not_found("Post", key)),
        }
    }

    /// Merge `patch` over an existing post.
    ///
    /// The slug index keeps pointing at the slug of the original title.
    pub async fn update_post(
        &self,
        author: &str,
        post_id: &str,
        patch: PostPatch,
    ) -> DomainResult<Post> {
        let mut post = self.get_post(author, post_id).await?;

        let patch = PostPatch {
            tags: patch.tags.map(normalize_tags).transpose()?,
            ..patch
        };
        post.apply(patch, self.clock.now());
        validate_title(&post.title)?;
        validate_content(&post.content)?;

        self.save(&keys::post(author, post_id), &post).await?;

        tracing::info!(author = %author, post_id = %post_id, "Post updated");
        Ok(post)
    }

    /// Remove a post record and its id from the author's post list.
    ///
    /// Any slug index entry for the post is left behind. Deleting a post that
    /// does not exist is not an error.
    pub async fn delete_post(&self, author: &str, post_id: &str) -> DomainResult<()> {
        self.store.delete(&keys::post(author, post_id)).await?;

        let list_key = keys::user_posts(author);
        if let Some(ids) = self.load::<Vec<String>>(&list_key).await? {
            let remaining: Vec<String> = ids
                .iter()
                .filter(|id| id.as_str() != post_id)
                .cloned()
                .collect();
            if remaining.len() != ids.len() {
                self.save(&list_key, &remaining).await?;
            }
        }

        tracing::info!(author = %author, post_id = %post_id, "Post deleted");
        Ok(())
    }

    /// Look up the post behind a public slug.
    pub async fn resolve_slug(&self, slug: &str) -> DomainResult<Post> {
        let slug_key = keys::slug(slug);
        let entry = self
            .load::<SlugEntry>(&slug_key)
            .await?
            .ok_or_else(|| DomainError::not_found("Article", slug))?;

        self.get_post(&entry.username, &entry.blog_id).await
    }

    /// Whether no existing post has the same normalized title.
    pub async fn is_title_available(&self, title: &str) -> DomainResult<bool> {
        let wanted = normalize_title(title);
        if wanted.is_empty() {
            return Ok(true);
        }

        let taken = self
            .list_all_posts()
            .await?
            .iter()
            .any(|post| normalize_title(&post.title) == wanted);
        Ok(!taken)
    }

    /// Round-trip to the underlying store.
    pub async fn ping(&self) -> DomainResult<()> {
        self.store.ping().await?;
        Ok(())
    }

    /// First free id at or after `millis` for this author.
    async fn next_post_id(&self, author: &str, millis: i64) -> DomainResult<String> {
        let mut candidate = millis;
        while self
            .store
            .exists(&keys::post(author, &candidate.to_string()))
            .await?
        {
            tracing::debug!(author = %author, post_id = candidate, "Post id taken, bumping");
            candidate += 1;
        }
        Ok(candidate.to_string())
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| DomainError::CorruptRecord {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> DomainResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| DomainError::Internal(e.to_string()))?;
        self.store.set(key, &raw).await?;
        Ok(())
    }
}

fn validate_username(username: &str) -> DomainResult<()> {
    if username.trim().is_empty() {
        return Err(DomainError::validation("Username is required"));
    }
    if username
        .chars()
        .any(|c| c.is_whitespace() || c == ':' || c == '/')
    {
        return Err(DomainError::validation(
            "Username may not contain whitespace, ':' or '/'",
        ));
    }
    Ok(())
}
