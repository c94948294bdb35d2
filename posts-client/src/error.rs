use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `posts-client`.
pub enum PostsClientError {
    /// Transport failure (`reqwest`): connection, timeout, undecodable body.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested post does not exist.
    #[error("not found")]
    NotFound,

    /// The server rejected the request (malformed id, missing field, id mismatch).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The server failed while handling the request.
    #[error("server error: {0}")]
    Server(String),
}

/// Result of `posts-client` operations.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            status if status.is_server_error() => Self::Server(message),
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::PostsClientError;

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = PostsClientError::from_http_status(reqwest::StatusCode::NOT_FOUND, None);
        assert!(matches!(err, PostsClientError::NotFound));
    }

    #[test]
    fn bad_request_keeps_server_message() {
        let err = PostsClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("validation failed for 'id'".to_string()),
        );
        match err {
            PostsClientError::InvalidRequest(message) => {
                assert_eq!(message, "validation failed for 'id'")
            }
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }

    #[test]
    fn server_error_status_maps_to_server() {
        let err =
            PostsClientError::from_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, None);
        assert!(matches!(err, PostsClientError::Server(_)));
    }
}
