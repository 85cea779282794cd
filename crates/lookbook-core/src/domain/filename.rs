//! Deterministic on-disk names for post documents.
//!
//! Canonical form is `YYYY-MM-DD-{slug}.json`. Older content used
//! `YYYY_MM_DD-{slug}.json` or a bare numeric id (`12.json`); both are
//! recognized by [`parse_filename`] so they can be migrated.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::post::Post;

pub const DOCUMENT_EXTENSION: &str = "json";

/// Separator used inside the date segment of a filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilenameStyle {
    #[default]
    Hyphen,
    Underscore,
}

impl FilenameStyle {
    fn date_format(self) -> &'static str {
        match self {
            FilenameStyle::Hyphen => "%Y-%m-%d",
            FilenameStyle::Underscore => "%Y_%m_%d",
        }
    }
}

impl fmt::Display for FilenameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameStyle::Hyphen => f.write_str("hyphen"),
            FilenameStyle::Underscore => f.write_str("underscore"),
        }
    }
}

impl FromStr for FilenameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hyphen" | "-" => Ok(FilenameStyle::Hyphen),
            "underscore" | "_" => Ok(FilenameStyle::Underscore),
            other => Err(format!("unknown filename style `{other}`")),
        }
    }
}

/// Lower-case, collapse every run of non-alphanumerics to one hyphen, trim
/// hyphens at both ends.
pub fn normalize_slug(slug: &str) -> String {
    slug::slugify(slug)
}

/// Canonical filename: hyphenated date, `.json` extension.
pub fn derive_filename(post: &Post) -> String {
    derive_filename_with(post, FilenameStyle::Hyphen, DOCUMENT_EXTENSION)
}

/// Filename for `post` under an explicit date style and extension.
///
/// A slug that normalizes to nothing falls back to `post-{id}` so two such
/// posts published on the same day do not share a file.
pub fn derive_filename_with(post: &Post, style: FilenameStyle, extension: &str) -> String {
    let date = post.published_at.format(style.date_format());
    let mut slug = normalize_slug(&post.slug);
    if slug.is_empty() {
        slug = format!("post-{}", post.id);
    }
    format!("{date}-{slug}.{extension}")
}

/// What a filename on disk looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilenameKind {
    Dated {
        date: NaiveDate,
        slug: String,
        style: FilenameStyle,
    },
    /// `12.json` - written by the earliest export scripts, keyed by id only.
    Legacy { id: u64 },
}

/// Recognize any of the known naming conventions. Returns `None` for names
/// that follow none of them (the document may still be readable).
pub fn parse_filename(name: &str) -> Option<FilenameKind> {
    let (stem, _ext) = name.rsplit_once('.')?;

    if !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()) {
        return stem.parse().ok().map(|id| FilenameKind::Legacy { id });
    }

    let date_part = stem.get(..10)?;
    let rest = stem.get(10..)?;
    let slug = rest.strip_prefix('-')?;
    if slug.is_empty() {
        return None;
    }

    [FilenameStyle::Hyphen, FilenameStyle::Underscore]
        .into_iter()
        .find_map(|style| {
            NaiveDate::parse_from_str(date_part, style.date_format())
                .ok()
                .map(|date| FilenameKind::Dated {
                    date,
                    slug: slug.to_string(),
                    style,
                })
        })
}
