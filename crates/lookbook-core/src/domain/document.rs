//! The on-disk document shape of a post and the mapping to and from [`Post`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::post::{DEFAULT_FEATURED, DEFAULT_READ_TIME, Post, PostDefaults, PostId};
use crate::error::DocumentError;

/// One post as stored in a JSON file. Field order is the order written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub published_at: String,
    pub category: String,
    pub location: String,
    pub featured: u32,
    pub read_time: u32,
    pub prev_post_id: Option<PostId>,
    pub next_post_id: Option<PostId>,
}

/// Lenient read-side mirror of [`PostDocument`]: every field optional so a
/// missing one can be named in the error instead of failing generically.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    id: Option<PostId>,
    title: Option<String>,
    slug: Option<String>,
    excerpt: Option<String>,
    content: Option<String>,
    cover_image: Option<String>,
    published_at: Option<String>,
    category: Option<String>,
    location: Option<String>,
    featured: Option<u32>,
    read_time: Option<u32>,
    prev_post_id: Option<PostId>,
    next_post_id: Option<PostId>,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-09T08:00:00.000Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts RFC 3339 with any offset, a naive date-time (taken as UTC) or a
/// bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DocumentError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(DocumentError::InvalidTimestamp(raw.to_string()))
}

pub fn to_document(post: &Post) -> PostDocument {
    PostDocument {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
        content: post.content.clone(),
        cover_image: post.cover_image.clone(),
        published_at: format_timestamp(&post.published_at),
        category: post.category.clone(),
        location: post.location.clone(),
        featured: post.featured,
        read_time: post.read_time,
        prev_post_id: post.prev_post_id,
        next_post_id: post.next_post_id,
    }
}

/// Rebuild a post from a parsed JSON document, keeping its stored id.
pub fn from_document(doc: Value, defaults: &PostDefaults) -> Result<Post, DocumentError> {
    let raw: RawDocument = serde_json::from_value(doc).map_err(DocumentError::Shape)?;

    let id = raw.id.ok_or(DocumentError::MissingField("id"))?;
    if id == PostId::MAX {
        return Err(DocumentError::InvalidField {
            field: "id",
            reason: format!("must be below {}", PostId::MAX),
        });
    }

    let read_time = raw.read_time.unwrap_or(DEFAULT_READ_TIME);
    if read_time == 0 {
        return Err(DocumentError::InvalidField {
            field: "readTime",
            reason: "must be at least 1".to_string(),
        });
    }

    let published_at = raw
        .published_at
        .ok_or(DocumentError::MissingField("publishedAt"))?;

    Ok(Post {
        id,
        title: raw.title.ok_or(DocumentError::MissingField("title"))?,
        slug: raw.slug.ok_or(DocumentError::MissingField("slug"))?,
        excerpt: raw.excerpt.unwrap_or_default(),
        content: raw.content.ok_or(DocumentError::MissingField("content"))?,
        cover_image: raw.cover_image.unwrap_or_default(),
        published_at: parse_timestamp(&published_at)?,
        category: raw.category.ok_or(DocumentError::MissingField("category"))?,
        location: raw.location.unwrap_or_else(|| defaults.location.clone()),
        featured: raw.featured.unwrap_or(DEFAULT_FEATURED),
        read_time,
        prev_post_id: raw.prev_post_id,
        next_post_id: raw.next_post_id,
    })
}

/// Pretty-printed JSON for a post, ready to be written to disk.
pub fn encode_document(post: &Post) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(&to_document(post))?;
    text.push('\n');
    Ok(text)
}

/// Parse raw file contents into a post.
pub fn decode_document(bytes: &[u8], defaults: &PostDefaults) -> Result<Post, DocumentError> {
    let value: Value = serde_json::from_slice(bytes).map_err(DocumentError::Syntax)?;
    from_document(value, defaults)
}
