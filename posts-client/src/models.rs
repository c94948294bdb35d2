use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Public representation of a post as served by `posts-server`.
pub struct Post {
    /// 24-character hex identifier.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author display name, `"<firstName> <lastName>"`.
    pub author: String,
    /// Insertion time (UTC).
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Envelope returned by `GET /posts`.
pub struct ListPostsResponse {
    /// Every stored post, in the store's order.
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Author subdocument sent when creating or replacing a post.
pub struct Author {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Title, content and author of a post to create or replace.
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author subdocument.
    pub author: Author,
}

impl Author {
    /// Builds an author from its two names.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
