//! Repository ports for posts and side records.

use async_trait::async_trait;

use crate::domain::{Neighbours, NewPost, Post, PostId, Record, RecordId};
use crate::error::RepoError;

/// The post catalog as seen by the API layer.
///
/// Implementations differ only in where their initial content comes from
/// and whether new posts are written through to disk.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Assign the next id, apply defaults and store the post.
    async fn create(&self, input: NewPost) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError>;

    /// All posts, optionally restricted to one category (case-insensitive).
    /// No ordering is promised.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Posts with a non-zero featured rank, highest rank first.
    async fn list_featured(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError>;

    /// All posts, most recently published first.
    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Post>, RepoError>;

    /// Resolve the prev/next links of `post`. Dangling ids come back empty.
    async fn neighbours(&self, post: &Post) -> Result<Neighbours, RepoError> {
        let prev = match post.prev_post_id {
            Some(id) => self.find_by_id(id).await?.map(|p| p.summary()),
            None => None,
        };
        let next = match post.next_post_id {
            Some(id) => self.find_by_id(id).await?.map(|p| p.summary()),
            None => None,
        };
        Ok(Neighbours { prev, next })
    }
}

/// Create-only store for a side record type.
#[async_trait]
pub trait RecordRepository<R: Record>: Send + Sync {
    async fn create(&self, draft: R::Draft) -> Result<R, RepoError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<R>, RepoError>;

    /// All records in creation order.
    async fn list(&self) -> Result<Vec<R>, RepoError>;

    /// Records matching `filter`, in creation order.
    async fn list_where(
        &self,
        filter: &(dyn for<'r> Fn(&'r R) -> bool + Send + Sync),
    ) -> Result<Vec<R>, RepoError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDefaults;
    use chrono::Utc;

    /// Fixed-content repository exercising the provided `neighbours` method.
    struct Fixed(Vec<Post>);

    #[async_trait]
    impl PostRepository for Fixed {
        async fn create(&self, _input: NewPost) -> Result<Post, RepoError> {
            unimplemented!("fixed content")
        }

        async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
            Ok(self.0.iter().find(|p| p.id == id).cloned())
        }

        async fn list(&self, _category: Option<&str>) -> Result<Vec<Post>, RepoError> {
            Ok(self.0.clone())
        }

        async fn list_featured(&self, _limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }

        async fn list_recent(&self, _limit: Option<usize>) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_neighbours_skip_dangling_ids() {
        let defaults = PostDefaults::default();
        let first = NewPost::new("First", "Travel", "a").into_post(1, &defaults, Utc::now());
        let mut second = NewPost::new("Second", "Travel", "b").into_post(2, &defaults, Utc::now());
        second.prev_post_id = Some(1);
        second.next_post_id = Some(99);

        let repo = Fixed(vec![first, second.clone()]);
        let links = repo.neighbours(&second).await.unwrap();

        assert_eq!(links.prev.map(|p| p.id), Some(1));
        assert!(links.next.is_none());
    }
}
