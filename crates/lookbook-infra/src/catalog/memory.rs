//! In-memory post catalog - the authoritative collection while the server runs.
//!
//! Note: content is lost on process restart unless exported to files.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use lookbook_core::domain::{NewPost, Post, PostDefaults, PostId};
use lookbook_core::error::RepoError;
use lookbook_core::ports::PostRepository;

use super::seed;

/// Posts in insertion order plus an id index. `next_id` only ever grows.
struct Catalog {
    posts: Vec<Post>,
    index: HashMap<PostId, usize>,
    next_id: PostId,
}

impl Catalog {
    fn empty() -> Self {
        Self {
            posts: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Ids `1..=n` in order, counter at `n + 1`.
    fn sequential(posts: Vec<Post>) -> Self {
        let index = posts.iter().enumerate().map(|(pos, p)| (p.id, pos)).collect();
        Self {
            next_id: posts.len() as PostId + 1,
            posts,
            index,
        }
    }

    fn insert(&mut self, post: Post) -> Result<(), RepoError> {
        if self.index.contains_key(&post.id) {
            return Err(RepoError::DuplicateId(post.id));
        }
        let after = post
            .id
            .checked_add(1)
            .ok_or(RepoError::IdOutOfRange(post.id))?;
        self.next_id = self.next_id.max(after);
        self.index.insert(post.id, self.posts.len());
        self.posts.push(post);
        Ok(())
    }

    fn reserve_id(&mut self) -> Result<PostId, RepoError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RepoError::IdOutOfRange(id))?;
        Ok(id)
    }
}

fn apply_limit(mut posts: Vec<Post>, limit: Option<usize>) -> Vec<Post> {
    if let Some(limit) = limit {
        posts.truncate(limit);
    }
    posts
}

/// In-memory catalog guarded by an async RwLock.
///
/// Id assignment and insertion happen under one write lock, so concurrent
/// `create` calls never observe or hand out the same id.
pub struct CatalogStore {
    inner: RwLock<Catalog>,
    defaults: PostDefaults,
}

impl CatalogStore {
    /// An empty catalog; ids start at 1.
    pub fn new(defaults: PostDefaults) -> Self {
        Self {
            inner: RwLock::new(Catalog::empty()),
            defaults,
        }
    }

    /// A catalog pre-populated with the built-in sample posts.
    pub fn seeded(defaults: PostDefaults) -> Self {
        let now = Utc::now();
        let posts = seed::sample_posts()
            .into_iter()
            .zip(1..)
            .map(|(input, id)| input.into_post(id, &defaults, now))
            .collect();
        let catalog = Catalog::sequential(posts);
        tracing::debug!(posts = catalog.posts.len(), "Seeded catalog");

        Self {
            inner: RwLock::new(catalog),
            defaults,
        }
    }

    pub fn defaults(&self) -> &PostDefaults {
        &self.defaults
    }

    /// Insert a post under the id it already carries (used when rebuilding
    /// from files). Bumps the id counter past it. A duplicate id is rejected
    /// and the existing post is kept.
    pub async fn insert_preserving_id(&self, post: Post) -> Result<(), RepoError> {
        let mut catalog = self.inner.write().await;
        catalog.insert(post)
    }

    /// Hand out an id without inserting anything. The id is never reused.
    pub(crate) async fn reserve_id(&self) -> Result<PostId, RepoError> {
        self.inner.write().await.reserve_id()
    }

    /// The id the next `create` would assign.
    pub async fn next_id(&self) -> PostId {
        self.inner.read().await.next_id
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(PostDefaults::default())
    }
}

#[async_trait]
impl PostRepository for CatalogStore {
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let mut catalog = self.inner.write().await;
        let id = catalog.reserve_id()?;
        let post = input.into_post(id, &self.defaults, Utc::now());
        catalog.insert(post.clone())?;

        tracing::info!(post_id = id, slug = %post.slug, "Post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .index
            .get(&id)
            .and_then(|&pos| catalog.posts.get(pos))
            .cloned())
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let catalog = self.inner.read().await;
        Ok(catalog
            .posts
            .iter()
            .filter(|post| category.is_none_or(|c| post.in_category(c)))
            .cloned()
            .collect())
    }

    async fn list_featured(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
        let mut featured: Vec<Post> = {
            let catalog = self.inner.read().await;
            catalog
                .posts
                .iter()
                .filter(|post| post.is_featured())
                .cloned()
                .collect()
        };
        // Stable sort: equal ranks keep insertion order.
        featured.sort_by(|a, b| b.featured.cmp(&a.featured));
        Ok(apply_limit(featured, limit))
    }

    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.inner.read().await.posts.clone();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(apply_limit(posts, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::{Duration, TimeZone};

    fn input(title: &str, category: &str) -> NewPost {
        NewPost::new(title, category, "<p>body</p>")
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = CatalogStore::default();
        let mut seen = Vec::new();
        for i in 0..5 {
            let post = store.create(input(&format!("Post {i}"), "Fashion")).await.unwrap();
            seen.push(post.id);
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);

        let next = store.create(input("Next", "Fashion")).await.unwrap();
        assert!(seen.iter().all(|&id| next.id > id));
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(CatalogStore::default());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(input(&format!("Post {i}"), "Travel")).await.unwrap().id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.next_id().await, 33);
    }

    #[tokio::test]
    async fn test_find_by_id_unknown_is_none() {
        let store = CatalogStore::default();
        store.create(input("Only", "Fashion")).await.unwrap();
        assert!(store.find_by_id(1).await.unwrap().is_some());
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_category_case_insensitively() {
        let store = CatalogStore::default();
        store.create(input("A", "Fashion")).await.unwrap();
        store.create(input("B", "Travel")).await.unwrap();
        store.create(input("C", "fashion")).await.unwrap();

        let lower: Vec<_> = store.list(Some("fashion")).await.unwrap();
        let upper: Vec<_> = store.list(Some("Fashion")).await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 2);
        assert_eq!(store.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_list_featured_orders_by_rank_and_limits() {
        let store = CatalogStore::default();
        for (i, rank) in [0, 3, 1, 2, 0].into_iter().enumerate() {
            store
                .create(input(&format!("Post {i}"), "Fashion").featured(rank))
                .await
                .unwrap();
        }

        let top: Vec<u32> = store
            .list_featured(Some(2))
            .await
            .unwrap()
            .iter()
            .map(|p| p.featured)
            .collect();
        assert_eq!(top, vec![3, 2]);

        assert_eq!(store.list_featured(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_featured_ties_keep_insertion_order() {
        let store = CatalogStore::default();
        store.create(input("First", "Fashion").featured(1)).await.unwrap();
        store.create(input("Second", "Fashion").featured(1)).await.unwrap();

        let titles: Vec<String> = store
            .list_featured(None)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_list_recent_newest_first() {
        let store = CatalogStore::default();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store.create(input("Old", "Travel").published_at(base)).await.unwrap();
        store
            .create(input("Newest", "Travel").published_at(base + Duration::days(2)))
            .await
            .unwrap();
        store
            .create(input("Middle", "Travel").published_at(base + Duration::days(1)))
            .await
            .unwrap();

        let titles: Vec<String> = store
            .list_recent(Some(2))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Newest", "Middle"]);
    }

    #[tokio::test]
    async fn test_insert_preserving_id_moves_counter() {
        let store = CatalogStore::default();
        let post = input("Imported", "Beauty").into_post(9, store.defaults(), Utc::now());
        store.insert_preserving_id(post.clone()).await.unwrap();

        assert!(matches!(
            store.insert_preserving_id(post).await,
            Err(RepoError::DuplicateId(9))
        ));
        let created = store.create(input("Fresh", "Beauty")).await.unwrap();
        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn test_insert_rejects_id_at_counter_limit() {
        let store = CatalogStore::default();
        let now = Utc::now();
        let last = input("Last", "Beauty").into_post(PostId::MAX, store.defaults(), now);
        assert!(matches!(
            store.insert_preserving_id(last).await,
            Err(RepoError::IdOutOfRange(PostId::MAX))
        ));
        assert_eq!(store.next_id().await, 1);
        assert!(store.is_empty().await);

        let edge = input("Edge", "Beauty").into_post(PostId::MAX - 1, store.defaults(), now);
        store.insert_preserving_id(edge).await.unwrap();
        assert!(matches!(
            store.create(input("Overflow", "Beauty")).await,
            Err(RepoError::IdOutOfRange(PostId::MAX))
        ));
    }

    #[tokio::test]
    async fn test_seeded_catalog_has_content() {
        let store = CatalogStore::seeded(PostDefaults::default());
        let count = store.len().await;
        assert!(count > 0);
        assert!(!store.list_featured(None).await.unwrap().is_empty());

        let created = store.create(input("After seed", "Fashion")).await.unwrap();
        assert_eq!(created.id as usize, count + 1);
    }
}
