//! Catalog whose content lives on disk.
//!
//! Reads are served from an in-memory [`CatalogStore`] rebuilt from the
//! document directory at startup; every created post is also written to its
//! own file. External edits made while the server runs are not picked up.

use async_trait::async_trait;
use chrono::Utc;

use lookbook_core::domain::{NewPost, Post, PostId};
use lookbook_core::error::RepoError;
use lookbook_core::ports::PostRepository;

use super::memory::CatalogStore;
use crate::files::PostFileRepository;
use crate::reconcile::rebuild_catalog_from_files;

pub struct FileBackedCatalog {
    catalog: CatalogStore,
    files: PostFileRepository,
}

impl FileBackedCatalog {
    /// Load every readable document from `files`. Unreadable files and
    /// duplicate ids are logged and skipped.
    pub async fn open(files: PostFileRepository) -> Self {
        let rebuild = rebuild_catalog_from_files(&files).await;
        if !rebuild.is_clean() {
            tracing::warn!(
                failures = rebuild.load_failures.len(),
                duplicates = rebuild.duplicate_ids.len(),
                "Some post documents were skipped while opening the catalog"
            );
        }

        Self {
            catalog: rebuild.store,
            files,
        }
    }

    pub fn files(&self) -> &PostFileRepository {
        &self.files
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }
}

#[async_trait]
impl PostRepository for FileBackedCatalog {
    /// The id is reserved before the write, so a failed write burns it.
    async fn create(&self, input: NewPost) -> Result<Post, RepoError> {
        let id = self.catalog.reserve_id().await?;
        let post = input.into_post(id, self.catalog.defaults(), Utc::now());

        self.files.save(&post).await?;
        self.catalog.insert_preserving_id(post.clone()).await?;

        tracing::info!(post_id = id, slug = %post.slug, "Post created and persisted");
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        self.catalog.find_by_id(id).await
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, RepoError> {
        self.catalog.list(category).await
    }

    async fn list_featured(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
        self.catalog.list_featured(limit).await
    }

    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
        self.catalog.list_recent(limit).await
    }
}
