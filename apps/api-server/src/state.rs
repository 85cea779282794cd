//! Application state - shared across all handlers.

use std::sync::Arc;

use lookbook_core::domain::{Comment, ContactSubmission, GalleryImage, Subscriber};
use lookbook_core::ports::{PostRepository, RateLimiter, RecordRepository};
use lookbook_infra::{CatalogStore, FileBackedCatalog, InMemoryRecordStore, PostFileRepository};

use crate::config::{AppConfig, ContentBackend};

/// Shared application state. Built once at startup and handed to every
/// worker; nothing in the server reaches for a global store.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub gallery: Arc<dyn RecordRepository<GalleryImage>>,
    pub comments: Arc<dyn RecordRepository<Comment>>,
    pub subscribers: Arc<dyn RecordRepository<Subscriber>>,
    pub contacts: Arc<dyn RecordRepository<ContactSubmission>>,
    pub form_limiter: Option<Arc<dyn RateLimiter>>,
}

impl AppState {
    /// Build the application state with the configured catalog backend.
    pub async fn new(config: &AppConfig) -> Self {
        let posts: Arc<dyn PostRepository> = match &config.content {
            ContentBackend::Seeded(defaults) => {
                tracing::info!("Using seeded in-memory catalog");
                Arc::new(CatalogStore::seeded(defaults.clone()))
            }
            ContentBackend::Files(files) => {
                tracing::info!(dir = %files.dir.display(), "Using file-backed catalog");
                Arc::new(FileBackedCatalog::open(PostFileRepository::new(files.clone())).await)
            }
        };

        let state = Self::with_posts(posts).with_form_limiter(default_form_limiter());
        tracing::info!("Application state initialized");
        state
    }

    /// State around an existing catalog with empty side stores and no
    /// rate limiting.
    pub fn with_posts(posts: Arc<dyn PostRepository>) -> Self {
        Self {
            posts,
            gallery: Arc::new(InMemoryRecordStore::<GalleryImage>::new()),
            comments: Arc::new(InMemoryRecordStore::<Comment>::new()),
            subscribers: Arc::new(InMemoryRecordStore::<Subscriber>::new()),
            contacts: Arc::new(InMemoryRecordStore::<ContactSubmission>::new()),
            form_limiter: None,
        }
    }

    pub fn with_form_limiter(mut self, limiter: Option<Arc<dyn RateLimiter>>) -> Self {
        self.form_limiter = limiter;
        self
    }

    /// Seeded catalog, default settings. Used by tests.
    #[cfg(test)]
    pub fn seeded() -> Self {
        Self::with_posts(Arc::new(CatalogStore::seeded(
            lookbook_core::domain::PostDefaults::default(),
        )))
    }
}

#[cfg(feature = "rate-limit")]
fn default_form_limiter() -> Option<Arc<dyn RateLimiter>> {
    Some(Arc::new(lookbook_infra::InMemoryRateLimiter::from_env()))
}

#[cfg(not(feature = "rate-limit"))]
fn default_form_limiter() -> Option<Arc<dyn RateLimiter>> {
    tracing::info!("Running without rate-limit feature - form submissions are not throttled");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookbook_core::domain::NewPost;
    use lookbook_infra::PostFileConfig;

    #[tokio::test]
    async fn test_file_backend_persists_new_posts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            content: ContentBackend::Files(PostFileConfig::new(tmp.path())),
        };

        let state = AppState::new(&config).await;
        assert!(state.posts.list(None).await.unwrap().is_empty());

        let post = state
            .posts
            .create(NewPost::new("Packing Light", "Travel", "<p>One bag.</p>"))
            .await
            .unwrap();
        assert_eq!(post.id, 1);

        let written = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(written, 1);
    }

    #[tokio::test]
    async fn test_seeded_backend_starts_with_samples() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            content: ContentBackend::Seeded(Default::default()),
        };
        let state = AppState::new(&config).await;
        assert!(!state.posts.list_recent(Some(1)).await.unwrap().is_empty());
    }
}
