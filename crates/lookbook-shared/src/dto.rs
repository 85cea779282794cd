//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lookbook_core::domain::{
    ContactSubmission, Neighbours, NewComment, Post, PostId, PostSummary,
};

/// `?category=` filter on post and gallery listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// `?limit=` on featured and recent listings. Absent means unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// A post together with its resolved navigation links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post: Post,
    pub prev_post: Option<PostSummary>,
    pub next_post: Option<PostSummary>,
}

impl PostDetailResponse {
    pub fn new(post: Post, links: Neighbours) -> Self {
        Self {
            post,
            prev_post: links.prev,
            next_post: links.next,
        }
    }
}

/// Comment body; the post id comes from the URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub author_name: String,
    pub email: String,
    pub content: String,
}

impl CreateCommentRequest {
    pub fn for_post(self, post_id: PostId) -> NewComment {
        NewComment {
            post_id,
            author_name: self.author_name,
            email: self.email,
            content: self.content,
        }
    }
}

/// Acknowledgement of a contact form; the message is not echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub id: u64,
    pub received_at: DateTime<Utc>,
}

impl From<&ContactSubmission> for ContactReceipt {
    fn from(submission: &ContactSubmission) -> Self {
        Self {
            id: submission.id,
            received_at: submission.created_at,
        }
    }
}
