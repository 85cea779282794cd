//! Side records kept next to posts: gallery images, comments, newsletter
//! subscribers and contact form submissions. They are create-only and live
//! in memory for the lifetime of the process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::post::PostId;
use crate::error::DomainError;

pub type RecordId = u64;

/// A record with store-assigned identity, built from a caller-supplied draft.
pub trait Record: Clone + Send + Sync + 'static {
    type Draft: Send + 'static;

    /// Name used in logs and not-found errors.
    const KIND: &'static str;

    fn id(&self) -> RecordId;

    fn from_draft(id: RecordId, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;
}

fn require(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} must not be empty"));
    }
}

fn require_email(problems: &mut Vec<String>, value: &str) {
    let plausible = value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });
    if !plausible {
        problems.push("email must be a valid address".to_string());
    }
}

fn finish(problems: Vec<String>) -> Result<(), DomainError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(problems.join("; ")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: RecordId,
    pub title: String,
    pub image_url: String,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGalleryImage {
    pub title: String,
    pub image_url: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl NewGalleryImage {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        require(&mut problems, "title", &self.title);
        require(&mut problems, "imageUrl", &self.image_url);
        require(&mut problems, "category", &self.category);
        finish(problems)
    }
}

impl Record for GalleryImage {
    type Draft = NewGalleryImage;
    const KIND: &'static str = "gallery_image";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewGalleryImage, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            image_url: draft.image_url,
            category: draft.category,
            description: draft.description,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: RecordId,
    pub post_id: PostId,
    pub author_name: String,
    pub email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub author_name: String,
    pub email: String,
    pub content: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        require(&mut problems, "authorName", &self.author_name);
        require_email(&mut problems, &self.email);
        require(&mut problems, "content", &self.content);
        finish(problems)
    }
}

impl Record for Comment {
    type Draft = NewComment;
    const KIND: &'static str = "comment";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewComment, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id: draft.post_id,
            author_name: draft.author_name,
            email: draft.email,
            content: draft.content,
            created_at,
        }
    }
}

/// A newsletter signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: RecordId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscriber {
    pub email: String,
}

impl NewSubscriber {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        require_email(&mut problems, &self.email);
        finish(problems)
    }
}

impl Record for Subscriber {
    type Draft = NewSubscriber;
    const KIND: &'static str = "subscriber";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewSubscriber, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email: draft.email.trim().to_lowercase(),
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl NewContactSubmission {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        require(&mut problems, "name", &self.name);
        require_email(&mut problems, &self.email);
        require(&mut problems, "message", &self.message);
        finish(problems)
    }
}

impl Record for ContactSubmission {
    type Draft = NewContactSubmission;
    const KIND: &'static str = "contact_submission";

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: NewContactSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            message: draft.message,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        let ok = NewSubscriber {
            email: "reader@example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        for bad in ["", "reader", "@example.com", "reader@localhost", "reader@example."] {
            let draft = NewSubscriber {
                email: bad.to_string(),
            };
            assert!(draft.validate().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_subscriber_email_is_normalized() {
        let sub = Subscriber::from_draft(
            1,
            NewSubscriber {
                email: "  Reader@Example.com ".to_string(),
            },
            Utc::now(),
        );
        assert_eq!(sub.email, "reader@example.com");
    }

    #[test]
    fn test_contact_requires_message() {
        let draft = NewContactSubmission {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            subject: String::new(),
            message: "   ".to_string(),
        };
        let err = draft.validate().unwrap_err().to_string();
        assert!(err.contains("message"));
    }
}
