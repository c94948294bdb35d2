use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::data::post_store::{NewPost, PostFields, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostId};

/// Process-local store. Keeps insertion order as its natural retrieval order.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    posts: Vec<Post>,
    last_created: Option<DateTime<Utc>>,
}

impl MemoryState {
    // creation timestamps never go backwards, even if the wall clock does
    fn next_created(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created = match self.last_created {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created = Some(created);
        created
    }

    fn push(&mut self, post: NewPost) -> Post {
        let created = self.next_created();
        let post = Post {
            id: PostId::generate(),
            title: post.title,
            content: post.content,
            author: post.author,
            created,
        };
        self.posts.push(post.clone());
        post
    }
}

impl InMemoryPostStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        let mut state = self.state.write().await;
        Ok(posts.into_iter().map(|post| state.push(post)).collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, DomainError> {
        Ok(self.state.write().await.push(post))
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.state.read().await.posts.clone())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn update_fields_by_id(
        &self,
        id: PostId,
        fields: PostFields,
    ) -> Result<Option<Post>, DomainError> {
        let mut state = self.state.write().await;
        let Some(post) = state.posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };

        post.title = fields.title;
        post.content = fields.content;
        post.author = fields.author;
        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        Ok(state.posts.len() < before)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.state.read().await.posts.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryPostStore;
    use crate::data::post_store::{NewPost, PostFields, PostStore};
    use crate::domain::post::{Author, PostId};

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("{title} content"),
            author: Author::new("Ada", "Lovelace").expect("author must be valid"),
        }
    }

    #[tokio::test]
    async fn insert_many_assigns_unique_ids_and_ordered_timestamps() {
        let store = InMemoryPostStore::new();
        let posts = store
            .insert_many(vec![new_post("a"), new_post("b"), new_post("c")])
            .await
            .expect("insert_many must succeed");

        assert_eq!(posts.len(), 3);
        assert_ne!(posts[0].id, posts[1].id);
        assert_ne!(posts[1].id, posts[2].id);
        assert!(posts[0].created <= posts[1].created);
        assert!(posts[1].created <= posts[2].created);
        assert_eq!(store.count().await.expect("count must succeed"), 3);
    }

    #[tokio::test]
    async fn find_all_keeps_insertion_order() {
        let store = InMemoryPostStore::new();
        store
            .insert_many(vec![new_post("first"), new_post("second")])
            .await
            .expect("insert_many must succeed");

        let titles: Vec<String> = store
            .find_all()
            .await
            .expect("find_all must succeed")
            .into_iter()
            .map(|post| post.title)
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn update_fields_by_id_keeps_id_and_created() {
        let store = InMemoryPostStore::new();
        let original = store.insert(new_post("old")).await.expect("insert");

        let updated = store
            .update_fields_by_id(
                original.id,
                PostFields {
                    title: "new".to_string(),
                    content: "new content".to_string(),
                    author: Author::new("Grace", "Hopper").expect("author must be valid"),
                },
            )
            .await
            .expect("update must succeed")
            .expect("post must exist");

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created, original.created);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.author.display_name(), "Grace Hopper");
    }

    #[tokio::test]
    async fn update_fields_by_id_returns_none_for_unknown_id() {
        let store = InMemoryPostStore::new();
        let result = store
            .update_fields_by_id(
                PostId::generate(),
                PostFields {
                    title: "t".to_string(),
                    content: "c".to_string(),
                    author: Author::new("Ada", "Lovelace").expect("author must be valid"),
                },
            )
            .await
            .expect("update must not fail");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_by_id_reports_whether_anything_was_removed() {
        let store = InMemoryPostStore::new();
        let post = store.insert(new_post("gone")).await.expect("insert");

        assert!(store.delete_by_id(post.id).await.expect("delete"));
        assert!(!store.delete_by_id(post.id).await.expect("second delete"));
        assert!(store.find_by_id(post.id).await.expect("find").is_none());
    }
}
