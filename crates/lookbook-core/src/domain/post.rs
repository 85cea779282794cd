use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identity of a post. Assigned by the catalog, never reused.
pub type PostId = u64;

pub const DEFAULT_FEATURED: u32 = 0;
pub const DEFAULT_READ_TIME: u32 = 5;
pub const DEFAULT_LOCATION: &str = "Worldwide";

/// Post entity - a single blog entry.
///
/// `featured` doubles as a flag and a rank: 0 means not featured, larger
/// values are promoted ahead of smaller ones. `prev_post_id` and
/// `next_post_id` are plain references and may point at posts that do not
/// exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub location: String,
    pub featured: u32,
    pub read_time: u32,
    pub prev_post_id: Option<PostId>,
    pub next_post_id: Option<PostId>,
}

impl Post {
    pub fn is_featured(&self) -> bool {
        self.featured > 0
    }

    /// Case-insensitive exact match on the category tag.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            cover_image: self.cover_image.clone(),
            published_at: self.published_at,
        }
    }
}

/// The slice of a post needed to render a navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub cover_image: String,
    pub published_at: DateTime<Utc>,
}

/// Resolved previous/next links of a post. A dangling id resolves to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbours {
    pub prev: Option<PostSummary>,
    pub next: Option<PostSummary>,
}

/// Configured values applied when a post omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDefaults {
    pub location: String,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

/// Input for creating a post. Everything but the identity is caller supplied;
/// optional fields fall back to [`PostDefaults`] and the module constants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured: Option<u32>,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub prev_post_id: Option<PostId>,
    #[serde(default)]
    pub next_post_id: Option<PostId>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn published_at(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = Some(at);
        self
    }

    pub fn featured(mut self, rank: u32) -> Self {
        self.featured = Some(rank);
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Check the fields a reader of the blog depends on.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("title must not be empty");
        }
        if self.category.trim().is_empty() {
            problems.push("category must not be empty");
        }
        if self.content.trim().is_empty() {
            problems.push("content must not be empty");
        }
        if self.read_time == Some(0) {
            problems.push("readTime must be at least 1 minute");
        }
        if !self.title.trim().is_empty() && self.resolved_slug().is_empty() {
            problems.push("slug could not be derived from title");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(problems.join("; ")))
        }
    }

    /// The explicit slug if one was given, otherwise one derived from the title.
    pub fn resolved_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slug::slugify(&self.title),
        }
    }

    /// Materialize the post under `id`, filling in defaults. The publish
    /// time is cut to whole milliseconds, the precision documents store.
    pub fn into_post(self, id: PostId, defaults: &PostDefaults, now: DateTime<Utc>) -> Post {
        let slug = self.resolved_slug();
        Post {
            id,
            title: self.title,
            slug,
            excerpt: self.excerpt,
            content: self.content,
            cover_image: self.cover_image,
            published_at: self.published_at.unwrap_or(now).trunc_subsecs(3),
            category: self.category,
            location: self
                .location
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| defaults.location.clone()),
            featured: self.featured.unwrap_or(DEFAULT_FEATURED),
            read_time: self.read_time.unwrap_or(DEFAULT_READ_TIME),
            prev_post_id: self.prev_post_id,
            next_post_id: self.next_post_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults_applied_on_materialize() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let post = NewPost::new("Linen Season", "Fashion", "<p>Hello</p>").into_post(
            7,
            &PostDefaults::default(),
            now,
        );

        assert_eq!(post.id, 7);
        assert_eq!(post.slug, "linen-season");
        assert_eq!(post.featured, 0);
        assert_eq!(post.read_time, 5);
        assert_eq!(post.location, DEFAULT_LOCATION);
        assert_eq!(post.published_at, now);
        assert_eq!(post.prev_post_id, None);
        assert_eq!(post.next_post_id, None);
    }

    #[test]
    fn test_explicit_slug_is_kept() {
        let post = NewPost::new("Linen Season", "Fashion", "body")
            .slug("summer-linen")
            .into_post(1, &PostDefaults::default(), Utc::now());
        assert_eq!(post.slug, "summer-linen");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let input = NewPost::new("  ", "", "x");
        let err = input.validate().unwrap_err().to_string();
        assert!(err.contains("title"));
        assert!(err.contains("category"));
    }

    #[test]
    fn test_validate_rejects_zero_read_time() {
        let mut input = NewPost::new("Title", "Travel", "body");
        input.read_time = Some(0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unsluggable_title() {
        let input = NewPost::new("!!!", "Travel", "body");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_category_match_ignores_case() {
        let post =
            NewPost::new("A", "Fashion", "b").into_post(1, &PostDefaults::default(), Utc::now());
        assert!(post.in_category("fashion"));
        assert!(post.in_category("FASHION"));
        assert!(!post.in_category("fash"));
    }
}
