//! JSON file repository - one pretty-printed document per post.
//!
//! Writes are not transactional and never delete anything: a post whose slug
//! or date changes leaves its old file behind (see `prune_orphans`).

use std::path::{Path, PathBuf};

use tokio::fs;

use lookbook_core::domain::{
    DOCUMENT_EXTENSION, FilenameStyle, Post, PostDefaults, decode_document,
    derive_filename_with, encode_document,
};
use lookbook_core::error::RepoError;

/// File repository configuration.
#[derive(Debug, Clone)]
pub struct PostFileConfig {
    /// Directory holding the documents. Created on first write.
    pub dir: PathBuf,
    /// Extension (without the dot) of files considered documents.
    pub extension: String,
    /// Date separator used when writing filenames.
    pub style: FilenameStyle,
    /// Values for optional fields missing from a document.
    pub defaults: PostDefaults,
}

impl PostFileConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DOCUMENT_EXTENSION.to_string(),
            style: FilenameStyle::default(),
            defaults: PostDefaults::default(),
        }
    }

    pub fn with_style(mut self, style: FilenameStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_defaults(mut self, defaults: PostDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn from_env() -> Self {
        let dir = std::env::var("CONTENT_DIR").unwrap_or_else(|_| "content/posts".to_string());
        let style = std::env::var("CONTENT_FILENAME_STYLE")
            .ok()
            .and_then(|s| match s.parse() {
                Ok(style) => Some(style),
                Err(e) => {
                    tracing::warn!("Ignoring CONTENT_FILENAME_STYLE: {}", e);
                    None
                }
            })
            .unwrap_or_default();
        let defaults = std::env::var("DEFAULT_LOCATION")
            .ok()
            .filter(|l| !l.trim().is_empty())
            .map(|location| PostDefaults { location })
            .unwrap_or_default();

        Self::new(dir).with_style(style).with_defaults(defaults)
    }
}

/// A single file that could not be read, written, renamed or removed.
#[derive(Debug)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: RepoError,
}

/// Result of reading every document in the directory.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully parsed posts, most recently published first.
    pub posts: Vec<Post>,
    pub failures: Vec<FileFailure>,
}

/// Result of writing a batch of posts.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl ExportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Durable one-file-per-post store.
#[derive(Debug, Clone)]
pub struct PostFileRepository {
    config: PostFileConfig,
}

impl PostFileRepository {
    pub fn new(config: PostFileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PostFileConfig {
        &self.config
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    pub fn filename_for(&self, post: &Post) -> String {
        derive_filename_with(post, self.config.style, &self.config.extension)
    }

    /// Write `post` to its derived filename, replacing any file of that exact
    /// name. Returns the path written.
    pub async fn save(&self, post: &Post) -> Result<PathBuf, RepoError> {
        let dir = self.dir();
        fs::create_dir_all(dir)
            .await
            .map_err(|e| RepoError::io(dir, e))?;

        let path = dir.join(self.filename_for(post));
        let body = encode_document(post).map_err(|e| RepoError::Serialization(e.to_string()))?;
        fs::write(&path, body)
            .await
            .map_err(|e| RepoError::io(&path, e))?;

        tracing::debug!(post_id = post.id, path = %path.display(), "Post document written");
        Ok(path)
    }

    /// Read and parse one document. Fails on the first problem.
    pub async fn load(&self, filename: &str) -> Result<Post, RepoError> {
        let path = self.dir().join(filename);
        let bytes = fs::read(&path)
            .await
            .map_err(|e| RepoError::io(&path, e))?;

        decode_document(&bytes, &self.config.defaults).map_err(|source| {
            RepoError::MalformedDocument {
                file: filename.to_string(),
                source,
            }
        })
    }

    /// Read every document. A bad file is reported and skipped; the load as a
    /// whole never fails.
    pub async fn load_all(&self) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        let names = match self.document_names().await {
            Ok(listing) => {
                outcome.failures.extend(listing.unreadable);
                listing.names
            }
            Err(error) => {
                tracing::warn!(
                    dir = %self.dir().display(),
                    error = %error,
                    "Cannot list post documents"
                );
                outcome.failures.push(FileFailure {
                    file: self.dir().to_path_buf(),
                    error,
                });
                return outcome;
            }
        };

        for name in names {
            match self.load(&name).await {
                Ok(post) => outcome.posts.push(post),
                Err(error) => {
                    tracing::warn!(
                        file = %name,
                        error = %error,
                        "Skipping unreadable post document"
                    );
                    outcome.failures.push(FileFailure {
                        file: self.dir().join(&name),
                        error,
                    });
                }
            }
        }

        // Stable: equal timestamps keep listing order.
        outcome
            .posts
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));

        tracing::info!(
            loaded = outcome.posts.len(),
            failed = outcome.failures.len(),
            "Post documents loaded"
        );
        outcome
    }

    /// Save each post in order. Not transactional: earlier writes stay on
    /// disk when a later one fails.
    pub async fn export_all(&self, posts: &[Post]) -> ExportReport {
        let mut report = ExportReport::default();

        for post in posts {
            match self.save(post).await {
                Ok(path) => report.written.push(path),
                Err(error) => {
                    tracing::error!(post_id = post.id, error = %error, "Failed to export post");
                    report.failures.push(FileFailure {
                        file: self.dir().join(self.filename_for(post)),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failed(),
            "Export finished"
        );
        report
    }

    /// Names of regular files carrying the document extension, sorted so
    /// repeated loads see the same order. A missing directory is empty.
    /// Documents whose name is not valid UTF-8 are returned as failures.
    pub(crate) async fn document_names(&self) -> Result<DocumentListing, RepoError> {
        let dir = self.dir();
        let mut listing = DocumentListing::default();
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(listing),
            Err(e) => return Err(RepoError::io(dir, e)),
        };

        let extension = self.config.extension.as_str();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::io(dir, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            let path = entry.path();
            if !is_file || path.extension().is_none_or(|ext| ext != extension) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => listing.names.push(name),
                Err(raw) => {
                    tracing::warn!(file = ?raw, "Skipping post document with non UTF-8 name");
                    listing.unreadable.push(FileFailure {
                        error: RepoError::io(
                            &path,
                            std::io::Error::new(
                                std::io::ErrorKind::InvalidData,
                                "file name is not valid UTF-8",
                            ),
                        ),
                        file: path,
                    });
                }
            }
        }

        listing.names.sort();
        Ok(listing)
    }
}

/// Document names in a directory plus entries that could not be named.
#[derive(Debug, Default)]
pub(crate) struct DocumentListing {
    pub names: Vec<String>,
    pub unreadable: Vec<FileFailure>,
}
