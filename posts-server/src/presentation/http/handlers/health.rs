use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::http::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    status: &'static str,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = HealthzResponse)
    )
)]
pub(crate) async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

pub(crate) async fn fallback_handler() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::application::post_service::PostService;
    use crate::data::repositories::memory::post_store::InMemoryPostStore;
    use crate::presentation::AppState;
    use crate::server::build_router;

    fn app() -> axum::Router {
        let service = PostService::new(Arc::new(InMemoryPostStore::new()));
        build_router(AppState::new(Arc::new(service)))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        (
            status,
            serde_json::from_slice(&bytes).expect("body must be json"),
        )
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (status, body) = get("/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let (status, body) = get("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = get("/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/posts/{id}"].is_object());
    }
}
