use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post, PostContent, PostId};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Author,
}

/// Fields overwritten together by a replace. `created` is never part of it.
#[derive(Debug, Clone)]
pub(crate) struct PostFields {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Author,
}

impl From<PostContent> for NewPost {
    fn from(value: PostContent) -> Self {
        Self {
            title: value.title,
            content: value.content,
            author: value.author,
        }
    }
}

impl From<PostContent> for PostFields {
    fn from(value: PostContent) -> Self {
        Self {
            title: value.title,
            content: value.content,
            author: value.author,
        }
    }
}

/// Document store holding the posts collection.
///
/// Lookups report absence with `None`/`false` instead of an error; only
/// failures of the store itself surface as `DomainError::Store`.
#[async_trait]
pub(crate) trait PostStore: Send + Sync {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError>;
    async fn insert(&self, post: NewPost) -> Result<Post, DomainError>;
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError>;
    /// Atomically sets `fields` on the post and returns it as stored afterwards.
    async fn update_fields_by_id(
        &self,
        id: PostId,
        fields: PostFields,
    ) -> Result<Option<Post>, DomainError>;
    async fn delete_by_id(&self, id: PostId) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;

    async fn close(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
