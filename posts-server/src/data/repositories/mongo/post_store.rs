use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{DateTime as BsonDateTime, doc};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::post_store::{NewPost, PostFields, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post, PostId};

#[derive(Debug)]
pub(crate) struct MongoPostStore {
    client: Client,
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    /// Opens a client and pings the database so a bad URL fails at startup.
    pub(crate) async fn connect(
        url: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, DomainError> {
        let client = Client::with_uri_str(url).await.map_err(map_mongo_error)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_error)?;

        info!(database, collection, "connected to document store");
        Ok(Self {
            collection: db.collection::<PostDocument>(collection),
            client,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    content: String,
    author: AuthorDocument,
    created: BsonDateTime,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorDocument {
    first_name: String,
    last_name: String,
}

impl From<&Author> for AuthorDocument {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name().to_string(),
            last_name: author.last_name().to_string(),
        }
    }
}

impl PostDocument {
    fn from_new_post(post: &NewPost, created: BsonDateTime) -> Self {
        Self {
            id: ObjectId::new(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: AuthorDocument::from(&post.author),
            created,
        }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let created = BsonDateTime::now();
        let documents: Vec<PostDocument> = posts
            .iter()
            .map(|post| PostDocument::from_new_post(post, created))
            .collect();

        self.collection
            .insert_many(&documents)
            .await
            .map_err(map_mongo_error)?;

        Ok(documents.into_iter().map(map_document_to_post).collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, DomainError> {
        let document = PostDocument::from_new_post(&post, BsonDateTime::now());

        self.collection
            .insert_one(&document)
            .await
            .map_err(map_mongo_error)?;

        Ok(map_document_to_post(document))
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?;
        let documents: Vec<PostDocument> = cursor.try_collect().await.map_err(map_mongo_error)?;

        Ok(documents.into_iter().map(map_document_to_post).collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;

        Ok(document.map(map_document_to_post))
    }

    async fn update_fields_by_id(
        &self,
        id: PostId,
        fields: PostFields,
    ) -> Result<Option<Post>, DomainError> {
        let title = fields.title;
        let content = fields.content;
        let first_name = fields.author.first_name().to_string();
        let last_name = fields.author.last_name().to_string();

        let document = self
            .collection
            .find_one_and_update(
                doc! { "_id": id.as_object_id() },
                doc! {
                    "$set": {
                        "title": title,
                        "content": content,
                        "author": {
                            "firstName": first_name,
                            "lastName": last_name,
                        },
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?;

        Ok(document.map(map_document_to_post))
    }

    async fn delete_by_id(&self, id: PostId) -> Result<bool, DomainError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(map_mongo_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_mongo_error)
    }

    async fn close(&self) -> Result<(), DomainError> {
        self.client.clone().shutdown().await;
        info!("document store connection closed");
        Ok(())
    }
}

fn map_document_to_post(document: PostDocument) -> Post {
    Post::from_stored(
        PostId::from(document.id),
        document.title,
        document.content,
        Author::from_stored(document.author.first_name, document.author.last_name),
        document.created.to_chrono(),
    )
}

fn map_mongo_error(err: mongodb::error::Error) -> DomainError {
    DomainError::Store(err.to_string())
}

#[cfg(test)]
mod tests {
    use bson::DateTime as BsonDateTime;
    use bson::oid::ObjectId;

    use super::{AuthorDocument, MongoPostStore, PostDocument, map_document_to_post};
    use crate::data::post_store::{NewPost, PostFields, PostStore};
    use crate::domain::post::Author;

    fn stored_document(title: &str, content: &str) -> PostDocument {
        PostDocument {
            id: ObjectId::new(),
            title: title.to_string(),
            content: content.to_string(),
            author: AuthorDocument {
                first_name: "lil Dude".to_string(),
                last_name: "McGee".to_string(),
            },
            created: BsonDateTime::now(),
        }
    }

    #[test]
    fn stored_document_with_empty_content_is_still_readable() {
        let document = stored_document("seeded", "");
        let id = document.id;

        let post = map_document_to_post(document);
        assert_eq!(post.id.as_object_id(), id);
        assert_eq!(post.content, "");
        assert_eq!(post.author.display_name(), "lil Dude McGee");
    }

    #[test]
    fn stored_title_and_content_are_returned_verbatim() {
        let post = map_document_to_post(stored_document("  padded  ", " body "));
        assert_eq!(post.title, "  padded  ");
        assert_eq!(post.content, " body ");
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB (DATABASE_URL)"]
    async fn mongo_store_round_trip() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());
        let store = MongoPostStore::connect(&url, "blog_test", "posts_round_trip")
            .await
            .expect("connect must succeed");

        let author = Author::new("Ada", "Lovelace").expect("author must be valid");
        let seeded = store
            .insert_many(vec![
                NewPost {
                    title: "first".to_string(),
                    content: "first content".to_string(),
                    author: author.clone(),
                },
                NewPost {
                    title: "second".to_string(),
                    content: "second content".to_string(),
                    author,
                },
            ])
            .await
            .expect("insert_many must succeed");

        let target = &seeded[0];
        let found = store
            .find_by_id(target.id)
            .await
            .expect("find must succeed")
            .expect("post must exist");
        assert_eq!(found.title, "first");
        assert_eq!(found.author.display_name(), "Ada Lovelace");

        let updated = store
            .update_fields_by_id(
                target.id,
                PostFields {
                    title: "renamed".to_string(),
                    content: "new content".to_string(),
                    author: Author::new("Grace", "Hopper").expect("author must be valid"),
                },
            )
            .await
            .expect("update must succeed")
            .expect("post must exist");
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.created, found.created);

        for post in &seeded {
            store.delete_by_id(post.id).await.expect("delete must succeed");
        }
        assert!(store.find_by_id(target.id).await.expect("find").is_none());
        store.close().await.expect("close must succeed");
    }
}
