use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rstest::rstest;

use super::BlogService;
use crate::domain::{NewPost, PostPatch, post_slug};
use crate::error::DomainError;
use crate::keys;
use crate::ports::{AuthError, Clock, KeyValueStore, PasswordService, StoreError};

/// HashMap store that counts writes.
#[derive(Default)]
struct RecordingStore {
    data: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl RecordingStore {
    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn put_raw(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.put_raw(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.data.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.data.lock().unwrap().contains_key(key))
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Store whose every call fails, as if Redis were down.
struct DownStore;

#[async_trait]
impl KeyValueStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
    async fn exists(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
    async fn scan_prefix(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Connection("refused".to_string()))
    }
}

/// Reversible "hash" so tests run without Argon2 cost.
struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain${password}"))
    }
}

/// Clock that advances one second per reading, or stays put when `step` is zero.
struct StepClock {
    start: DateTime<Utc>,
    step_secs: i64,
    ticks: AtomicI64,
}

impl StepClock {
    fn stepping() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            step_secs: 1,
            ticks: AtomicI64::new(0),
        }
    }

    fn frozen() -> Self {
        Self {
            step_secs: 0,
            ..Self::stepping()
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + chrono::Duration::seconds(tick * self.step_secs)
    }
}

fn service_with(store: Arc<RecordingStore>, clock: StepClock) -> BlogService {
    BlogService::new(store, Arc::new(PlainPasswords)).with_clock(Arc::new(clock))
}

fn service() -> (BlogService, Arc<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    (service_with(store.clone(), StepClock::stepping()), store)
}

fn words(n: usize) -> String {
    vec!["lorem"; n].join(" ")
}

fn new_post(title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: words(150),
        category: None,
        tags: vec!["rust".to_string()],
    }
}

#[tokio::test]
async fn register_twice_conflicts() {
    let (blog, _) = service();
    blog.register_user("alice", "x").await.unwrap();

    let err = blog.register_user("alice", "y").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn register_stores_user_and_empty_post_list() {
    let (blog, store) = service();
    blog.register_user("alice", "secret").await.unwrap();

    let user = store.raw("user:alice").unwrap();
    assert!(!user.contains("\"secret\""));
    assert_eq!(store.raw("user_blogs:alice").as_deref(), Some("[]"));
}

#[rstest]
#[case("", "pw")]
#[case("   ", "pw")]
#[case("bob", "")]
#[case("bad:name", "pw")]
#[tokio::test]
async fn register_rejects_missing_fields(#[case] username: &str, #[case] password: &str) {
    let (blog, store) = service();
    let err = blog.register_user(username, password).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn authenticate_restores_username_missing_from_record() {
    let (blog, store) = service();
    store.put_raw(
        "user:legacy",
        r#"{"password_hash":"plain$pw","created_at":"2024-01-01T00:00:00Z"}"#,
    );

    assert_eq!(blog.authenticate("legacy", "pw").await.unwrap(), "legacy");
}

#[tokio::test]
async fn authenticate_checks_password() {
    let (blog, _) = service();
    blog.register_user("alice", "right").await.unwrap();

    assert_eq!(blog.authenticate("alice", "right").await.unwrap(), "alice");
    assert!(matches!(
        blog.authenticate("alice", "wrong").await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        blog.authenticate("nobody", "right").await,
        Err(DomainError::Unauthorized)
    ));
}

#[rstest]
#[case("Hello, World! 2024", 0, 100, Some("hello-world-2024"))]
#[case("---Edge---", 4, 3000, Some("edge"))]
#[case("Rust & Redis", 1, 150, Some("rust-redis"))]
#[case("Привет мир", 4, 100, None)]
#[case("日本語", 0, 3000, None)]
#[case("!!!", 2, 500, None)]
#[tokio::test]
async fn created_post_resolves_by_slug(
    #[case] title: &str,
    #[case] tag_count: usize,
    #[case] word_count: usize,
    #[case] expected_slug: Option<&str>,
) {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();

    let tags: Vec<String> = (0..tag_count).map(|i| format!("tag{i}")).collect();
    let published = blog
        .create_post(
            "alice",
            NewPost {
                title: title.to_string(),
                content: words(word_count),
                category: None,
                tags: tags.clone(),
            },
        )
        .await
        .unwrap();

    // Titles without ASCII letters or digits are shared under their post id.
    let expected_slug = expected_slug.unwrap_or(&published.id);
    assert_eq!(published.slug, expected_slug);
    assert_eq!(published.slug, post_slug(title, &published.id));

    let post = blog.resolve_slug(&published.slug).await.unwrap();
    assert_eq!(post.id, published.id);
    assert_eq!(post.title, title);
    assert_eq!(post.author, "alice");
    assert_eq!(post.tags, tags);
}

#[rstest]
#[case(99)]
#[case(3001)]
#[tokio::test]
async fn create_rejects_out_of_range_word_counts(#[case] n: usize) {
    let (blog, store) = service();
    blog.register_user("alice", "pw").await.unwrap();
    let before = store.writes();

    let err = blog
        .create_post(
            "alice",
            NewPost {
                content: words(n),
                ..new_post("Bounds")
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(store.writes(), before);
}

#[rstest]
#[case(100)]
#[case(3000)]
#[tokio::test]
async fn create_accepts_boundary_word_counts(#[case] n: usize) {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();

    let post = NewPost {
        content: words(n),
        tags: ["a", "b", "c", "d"].map(String::from).to_vec(),
        ..new_post("Bounds")
    };
    assert!(blog.create_post("alice", post).await.is_ok());
}

#[tokio::test]
async fn create_rejects_five_tags() {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();

    let post = NewPost {
        tags: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
        ..new_post("Too many tags")
    };
    assert!(matches!(
        blog.create_post("alice", post).await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn create_for_unknown_author_is_not_found() {
    let (blog, _) = service();
    assert!(matches!(
        blog.create_post("ghost", new_post("Orphan")).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn same_millisecond_posts_get_distinct_ids() {
    let store = Arc::new(RecordingStore::default());
    let blog = service_with(store, StepClock::frozen());
    blog.register_user("alice", "pw").await.unwrap();

    let first = blog.create_post("alice", new_post("One")).await.unwrap();
    let second = blog.create_post("alice", new_post("Two")).await.unwrap();

    assert_ne!(first.id, second.id);
    let first_ms: i64 = first.id.parse().unwrap();
    let second_ms: i64 = second.id.parse().unwrap();
    assert_eq!(second_ms, first_ms + 1);
    assert_eq!(blog.list_posts("alice").await.unwrap().len(), 2);
}

#[tokio::test]
async fn list_posts_skips_missing_and_corrupt_records() {
    let (blog, store) = service();
    blog.register_user("alice", "pw").await.unwrap();
    let kept = blog.create_post("alice", new_post("Kept")).await.unwrap();
    let broken = blog.create_post("alice", new_post("Broken")).await.unwrap();

    store.put_raw(&keys::post("alice", &broken.id), "{not json");
    store.put_raw(
        "user_blogs:alice",
        &format!(r#"["{}","{}","404"]"#, kept.id, broken.id),
    );

    let posts = blog.list_posts("alice").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, kept.id);
}

#[tokio::test]
async fn list_all_posts_spans_authors_newest_first() {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();
    blog.register_user("bob", "pw").await.unwrap();
    blog.create_post("alice", new_post("Alpha")).await.unwrap();
    blog.create_post("bob", new_post("Beta")).await.unwrap();
    blog.create_post("alice", new_post("Gamma")).await.unwrap();

    let titles: Vec<String> = blog
        .list_all_posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Gamma", "Beta", "Alpha"]);
}

#[tokio::test]
async fn update_merges_fields_and_keeps_slug() {
    let (blog, store) = service();
    blog.register_user("alice", "pw").await.unwrap();
    let published = blog.create_post("alice", new_post("Original")).await.unwrap();

    let updated = blog
        .update_post(
            "alice",
            &published.id,
            PostPatch {
                title: Some("Renamed".to_string()),
                tags: Some(vec![" go ".to_string(), "go".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.content, words(150));
    assert_eq!(updated.tags, vec!["go".to_string()]);
    assert!(updated.updated_at > updated.created_at);

    // The index still points at the old slug only.
    assert!(store.raw("blog_slug:original").is_some());
    assert!(store.raw("blog_slug:renamed").is_none());
    assert_eq!(blog.resolve_slug("original").await.unwrap().title, "Renamed");
}

#[tokio::test]
async fn update_missing_post_is_not_found_without_writes() {
    let (blog, store) = service();
    blog.register_user("alice", "pw").await.unwrap();
    let before = store.writes();

    let err = blog
        .update_post(
            "alice",
            "12345",
            PostPatch {
                title: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(store.writes(), before);
}

#[tokio::test]
async fn update_revalidates_content() {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();
    let published = blog.create_post("alice", new_post("Short")).await.unwrap();

    let err = blog
        .update_post(
            "alice",
            &published.id,
            PostPatch {
                content: Some(words(10)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(blog.get_post("alice", &published.id).await.unwrap().content, words(150));
}

#[tokio::test]
async fn delete_removes_from_list_but_leaves_slug_entry() {
    let (blog, store) = service();
    blog.register_user("alice", "pw").await.unwrap();
    let published = blog.create_post("alice", new_post("Doomed")).await.unwrap();
    let before = blog.resolve_slug("doomed").await.unwrap();

    blog.delete_post("alice", &published.id).await.unwrap();

    assert!(blog.list_posts("alice").await.unwrap().is_empty());
    assert!(store.raw("blog_slug:doomed").is_some());
    assert!(matches!(
        blog.resolve_slug("doomed").await,
        Err(DomainError::NotFound { .. })
    ));
    // What a reader fetched before the delete is untouched.
    assert_eq!(before.title, "Doomed");
}

#[tokio::test]
async fn delete_missing_post_succeeds() {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();
    assert!(blog.delete_post("alice", "nope").await.is_ok());
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let (blog, _) = service();
    assert!(matches!(
        blog.resolve_slug("nothing-here").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn title_availability_uses_normalized_titles() {
    let (blog, _) = service();
    blog.register_user("alice", "pw").await.unwrap();
    blog.create_post("alice", new_post("My First Post")).await.unwrap();

    assert!(!blog.is_title_available("my-first post 2").await.unwrap());
    assert!(blog.is_title_available("My Second Post").await.unwrap());
}

#[tokio::test]
async fn store_outage_surfaces_as_unavailable() {
    let blog = BlogService::new(Arc::new(DownStore), Arc::new(PlainPasswords));

    assert!(matches!(
        blog.register_user("alice", "pw").await,
        Err(DomainError::StoreUnavailable(_))
    ));
    assert!(matches!(blog.ping().await, Err(DomainError::StoreUnavailable(_))));
    assert!(matches!(
        blog.list_all_posts().await,
        Err(DomainError::StoreUnavailable(_))
    ));
}
