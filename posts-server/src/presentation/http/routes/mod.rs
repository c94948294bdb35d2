use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::health::{fallback_handler, health_handler};

pub(crate) mod posts;

pub(crate) fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .merge(posts::router())
        .fallback(fallback_handler)
        .with_state(state)
}
