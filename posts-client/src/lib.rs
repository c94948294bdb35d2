//! Client library for the `posts-server` REST API.
//!
//! [`PostsClient`] wraps `reqwest` and maps non-success responses to
//! [`PostsClientError`] using the server's `{"error": ...}` body.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostsClientError, PostsClientResult};
pub use http_client::PostsClient;
pub use models::{Author, ListPostsResponse, Post, PostDraft};
