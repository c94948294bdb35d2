use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{Author, ListPostsResponse, Post, PostDraft};

#[derive(Debug, Serialize)]
struct ReplacePostRequestDto<'a> {
    id: &'a str,
    title: &'a str,
    content: &'a str,
    author: &'a Author,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Clone)]
/// HTTP client for the `posts-server` REST API.
pub struct PostsClient {
    base_url: String,
    client: Client,
}

impl PostsClient {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> PostsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> PostsClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        PostsClientError::from_http_status(status, Some(message))
    }

    async fn send<TReq>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> PostsClientResult<reqwest::Response>
    where
        TReq: Serialize + ?Sized,
    {
        let mut request = self.client.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(PostsClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
    ) -> PostsClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        self.send(method, path, body)
            .await?
            .json::<TRes>()
            .await
            .map_err(PostsClientError::from_reqwest)
    }

    /// Lists every post.
    pub async fn list_posts(&self) -> PostsClientResult<ListPostsResponse> {
        self.send_json(Method::GET, "/posts", None::<&()>).await
    }

    /// Fetches one post by id.
    pub async fn get_post(&self, id: &str) -> PostsClientResult<Post> {
        self.send_json(Method::GET, &format!("/posts/{id}"), None::<&()>)
            .await
    }

    /// Creates a post; the server assigns its id.
    pub async fn create_post(&self, draft: &PostDraft) -> PostsClientResult<Post> {
        self.send_json(Method::POST, "/posts", Some(draft))
            .await
    }

    /// Replaces title, content and author of an existing post.
    pub async fn replace_post(&self, id: &str, draft: &PostDraft) -> PostsClientResult<Post> {
        let payload = ReplacePostRequestDto {
            id,
            title: &draft.title,
            content: &draft.content,
            author: &draft.author,
        };
        self.send_json(
            Method::PUT,
            &format!("/posts/{id}"),
            Some(&payload),
        )
        .await
    }

    /// Deletes a post. Deleting an absent post succeeds.
    pub async fn delete_post(&self, id: &str) -> PostsClientResult<()> {
        self.send(Method::DELETE, &format!("/posts/{id}"), None::<&()>)
            .await?;
        Ok(())
    }
}
