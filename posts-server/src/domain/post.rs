use std::fmt;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use super::error::DomainError;

/// Store-assigned identifier of a post (a BSON `ObjectId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PostId(ObjectId);

impl PostId {
    pub(crate) fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, DomainError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::Validation {
                field: "id",
                message: "must be a 24-character hex object id",
            })
    }

    pub(crate) fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for PostId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Author subdocument. Both names are always present once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Author {
    first_name: String,
    last_name: String,
}

impl Author {
    pub(crate) fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: normalize_name("author.firstName", &first_name.into())?,
            last_name: normalize_name("author.lastName", &last_name.into())?,
        })
    }

    /// Rebuilds an author already held by the store. Values are kept as stored.
    pub(crate) fn from_stored(first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            last_name,
        }
    }

    pub(crate) fn first_name(&self) -> &str {
        &self.first_name
    }

    pub(crate) fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Public rendering of the author: `"<firstName> <lastName>"`.
    pub(crate) fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: PostId,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Author,
    pub(crate) created: DateTime<Utc>,
}

impl Post {
    /// Rebuilds a post from a stored document. Write-side validation does not
    /// apply here: documents seeded directly into the store are served as-is.
    pub(crate) fn from_stored(
        id: PostId,
        title: String,
        content: String,
        author: Author,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            author,
            created,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AuthorInput {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

/// Unvalidated title/content/author as received from a client.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostInput {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Option<AuthorInput>,
}

/// Validated, normalized fields shared by create and replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostContent {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Author,
}

impl PostInput {
    pub(crate) fn validate(self) -> Result<PostContent, DomainError> {
        let title = normalize_title(&self.title)?;
        let content = normalize_content(&self.content)?;
        let author = self.author.ok_or(DomainError::Validation {
            field: "author",
            message: "must be provided",
        })?;

        Ok(PostContent {
            title,
            content,
            author: Author::new(author.first_name, author.last_name)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ReplacePostRequest {
    pub(crate) id: Option<String>,
    pub(crate) post: PostInput,
}

impl ReplacePostRequest {
    /// The body id has to name the same post as the path.
    pub(crate) fn validate(self, path_id: PostId) -> Result<PostContent, DomainError> {
        match self.id.as_deref().map(PostId::parse) {
            Some(Ok(body_id)) if body_id == path_id => self.post.validate(),
            _ => Err(DomainError::Validation {
                field: "id",
                message: "must match the id in the path",
            }),
        }
    }
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation {
            field: "title",
            message: "must not be empty",
        });
    }
    Ok(title.to_string())
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    Ok(content.to_string())
}

fn normalize_name(field: &'static str, name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(name.to_string())
}
