use std::sync::Arc;

use tracing::debug;

use crate::data::post_store::{NewPost, PostFields, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId, PostInput, ReplacePostRequest};

#[derive(Clone)]
pub(crate) struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub(crate) fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.store.find_all().await
    }

    pub(crate) async fn get_post(&self, raw_id: &str) -> Result<Post, DomainError> {
        let id = PostId::parse(raw_id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn create_post(&self, input: PostInput) -> Result<Post, DomainError> {
        let content = input.validate()?;
        self.store.insert(NewPost::from(content)).await
    }

    /// Overwrites title, content and author of an existing post in one store
    /// write. A missing post is reported as not found; no id is minted here.
    pub(crate) async fn replace_post(
        &self,
        raw_id: &str,
        req: ReplacePostRequest,
    ) -> Result<Post, DomainError> {
        let id = PostId::parse(raw_id)?;
        let content = req.validate(id)?;

        self.store
            .update_fields_by_id(id, PostFields::from(content))
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn delete_post(&self, raw_id: &str) -> Result<(), DomainError> {
        let id = PostId::parse(raw_id)?;
        let deleted = self.store.delete_by_id(id).await?;
        if !deleted {
            debug!(%id, "delete of absent post treated as success");
        }
        Ok(())
    }
}
