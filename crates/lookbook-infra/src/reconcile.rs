//! One-shot synchronization between a post catalog and the file repository.
//!
//! Neither direction is atomic. Export never removes stale files, so a post
//! whose slug or date changed keeps its old document next to the new one
//! until an operator runs [`PostFileRepository::prune_orphans`].

use lookbook_core::domain::PostId;
use lookbook_core::error::RepoError;
use lookbook_core::ports::PostRepository;

use crate::catalog::CatalogStore;
use crate::files::{ExportReport, FileFailure, PostFileRepository};

/// Write every post of `store` to `files`.
pub async fn export_catalog_to_files(
    store: &dyn PostRepository,
    files: &PostFileRepository,
) -> Result<ExportReport, RepoError> {
    let posts = store.list(None).await?;
    tracing::info!(posts = posts.len(), dir = %files.dir().display(), "Exporting catalog");
    Ok(files.export_all(&posts).await)
}

/// A catalog rebuilt from disk together with everything that was skipped.
pub struct Rebuild {
    pub store: CatalogStore,
    pub load_failures: Vec<FileFailure>,
    /// Ids found in more than one document; the most recently published
    /// copy was kept.
    pub duplicate_ids: Vec<PostId>,
}

impl Rebuild {
    pub fn is_clean(&self) -> bool {
        self.load_failures.is_empty() && self.duplicate_ids.is_empty()
    }
}

/// Build a fresh catalog from the documents in `files`, keeping each
/// document's id. The new catalog's next id is one past the largest loaded.
pub async fn rebuild_catalog_from_files(files: &PostFileRepository) -> Rebuild {
    let outcome = files.load_all().await;
    let store = CatalogStore::new(files.config().defaults.clone());
    let mut duplicate_ids = Vec::new();

    for post in outcome.posts {
        let id = post.id;
        if let Err(error) = store.insert_preserving_id(post).await {
            tracing::warn!(post_id = id, error = %error, "Dropping duplicate post document");
            duplicate_ids.push(id);
        }
    }

    tracing::info!(
        posts = store.len().await,
        next_id = store.next_id().await,
        failures = outcome.failures.len(),
        duplicates = duplicate_ids.len(),
        "Catalog rebuilt from files"
    );

    Rebuild {
        store,
        load_failures: outcome.failures,
        duplicate_ids,
    }
}
