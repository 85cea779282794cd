//! Operator-triggered housekeeping on the document directory: migrating
//! legacy filenames and removing documents no current post maps to.

use std::collections::HashSet;

use tokio::fs;

use lookbook_core::domain::{FilenameKind, Post, parse_filename};
use lookbook_core::error::RepoError;

use super::repository::{FileFailure, PostFileRepository};

/// Outcome of [`PostFileRepository::normalize_filenames`].
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// `(old name, new name)` pairs.
    pub renamed: Vec<(String, String)>,
    pub unchanged: usize,
    /// Files left alone because their canonical name is already taken.
    pub conflicts: Vec<(String, String)>,
    pub failures: Vec<FileFailure>,
}

/// Outcome of [`PostFileRepository::prune_orphans`].
#[derive(Debug, Default)]
pub struct PruneReport {
    pub removed: Vec<String>,
    pub failures: Vec<FileFailure>,
}

fn describe(name: &str) -> &'static str {
    match parse_filename(name) {
        Some(FilenameKind::Legacy { .. }) => "legacy-numeric",
        Some(FilenameKind::Dated { .. }) => "dated",
        None => "unrecognized",
    }
}

impl PostFileRepository {
    /// Rename every readable document to the name derived from its contents.
    ///
    /// Covers legacy numeric names, the other date separator and stale
    /// slugs. An existing file at the target name is never overwritten.
    pub async fn normalize_filenames(&self) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        let names = match self.document_names().await {
            Ok(listing) => {
                report.failures.extend(listing.unreadable);
                listing.names
            }
            Err(error) => {
                report.failures.push(FileFailure {
                    file: self.dir().to_path_buf(),
                    error,
                });
                return report;
            }
        };
        let mut taken: HashSet<String> = names.iter().cloned().collect();

        for name in names {
            let post = match self.load(&name).await {
                Ok(post) => post,
                Err(error) => {
                    report.failures.push(FileFailure {
                        file: self.dir().join(&name),
                        error,
                    });
                    continue;
                }
            };

            let canonical = self.filename_for(&post);
            if canonical == name {
                report.unchanged += 1;
                continue;
            }
            if taken.contains(&canonical) {
                tracing::warn!(
                    from = %name,
                    to = %canonical,
                    "Canonical filename already in use, skipping"
                );
                report.conflicts.push((name, canonical));
                continue;
            }

            let from = self.dir().join(&name);
            let to = self.dir().join(&canonical);
            match fs::rename(&from, &to).await {
                Ok(()) => {
                    tracing::info!(
                        post_id = post.id,
                        kind = describe(&name),
                        from = %name,
                        to = %canonical,
                        "Document renamed"
                    );
                    taken.remove(&name);
                    taken.insert(canonical.clone());
                    report.renamed.push((name, canonical));
                }
                Err(e) => report.failures.push(FileFailure {
                    file: from.clone(),
                    error: RepoError::io(from, e),
                }),
            }
        }

        report
    }

    /// Delete documents whose name is not the derived filename of any post
    /// in `posts`. Nothing calls this implicitly; export leaves orphans.
    pub async fn prune_orphans(&self, posts: &[Post]) -> PruneReport {
        let mut report = PruneReport::default();
        let keep: HashSet<String> = posts.iter().map(|p| self.filename_for(p)).collect();

        let names = match self.document_names().await {
            Ok(listing) => {
                report.failures.extend(listing.unreadable);
                listing.names
            }
            Err(error) => {
                report.failures.push(FileFailure {
                    file: self.dir().to_path_buf(),
                    error,
                });
                return report;
            }
        };

        for name in names.into_iter().filter(|n| !keep.contains(n)) {
            let path = self.dir().join(&name);
            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::info!(file = %name, "Orphaned document removed");
                    report.removed.push(name);
                }
                Err(e) => report.failures.push(FileFailure {
                    file: path.clone(),
                    error: RepoError::io(path, e),
                }),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::PostFileConfig;
    use chrono::{TimeZone, Utc};
    use lookbook_core::domain::{NewPost, PostDefaults, encode_document};
    use tempfile::TempDir;

    fn post(id: u64, slug: &str) -> Post {
        NewPost::new("Title", "Travel", "<p>body</p>")
            .slug(slug)
            .published_at(Utc.with_ymd_and_hms(2023, 12, 24, 18, 0, 0).unwrap())
            .into_post(id, &PostDefaults::default(), Utc::now())
    }

    fn write_raw(tmp: &TempDir, name: &str, post: &Post) {
        std::fs::write(tmp.path().join(name), encode_document(post).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_normalize_migrates_legacy_names() {
        let tmp = TempDir::new().unwrap();
        let repo = PostFileRepository::new(PostFileConfig::new(tmp.path()));
        write_raw(&tmp, "12.json", &post(12, "winter-market"));
        write_raw(&tmp, "2023_12_24-ski-trip.json", &post(13, "ski-trip"));
        write_raw(&tmp, "2023-12-24-already-fine.json", &post(14, "already-fine"));

        let report = repo.normalize_filenames().await;

        assert_eq!(report.renamed.len(), 2);
        assert_eq!(report.unchanged, 1);
        assert!(report.failures.is_empty());
        assert!(tmp.path().join("2023-12-24-winter-market.json").exists());
        assert!(tmp.path().join("2023-12-24-ski-trip.json").exists());
        assert!(!tmp.path().join("12.json").exists());
    }

    #[tokio::test]
    async fn test_normalize_never_overwrites() {
        let tmp = TempDir::new().unwrap();
        let repo = PostFileRepository::new(PostFileConfig::new(tmp.path()));
        write_raw(&tmp, "2023-12-24-market.json", &post(1, "market"));
        write_raw(&tmp, "7.json", &post(7, "market"));

        let report = repo.normalize_filenames().await;

        assert!(report.renamed.is_empty());
        assert_eq!(report.conflicts.len(), 1);
        let kept = repo.load("2023-12-24-market.json").await.unwrap();
        assert_eq!(kept.id, 1);
    }

    #[tokio::test]
    async fn test_prune_removes_only_orphans() {
        let tmp = TempDir::new().unwrap();
        let repo = PostFileRepository::new(PostFileConfig::new(tmp.path()));
        let current = post(1, "new-slug");
        repo.save(&post(1, "old-slug")).await.unwrap();
        repo.save(&current).await.unwrap();

        let report = repo.prune_orphans(std::slice::from_ref(&current)).await;

        assert_eq!(report.removed, vec!["2023-12-24-old-slug.json".to_string()]);
        assert!(tmp.path().join("2023-12-24-new-slug.json").exists());
    }
}
