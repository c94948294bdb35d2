use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::post_store::PostStore;
use data::repositories::memory::post_store::InMemoryPostStore;
use data::repositories::mongo::post_store::MongoPostStore;
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, StoreBackend};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let store = open_store(&settings).await?;
    let posts = store.count().await?;
    info!(backend = ?settings.store_backend, posts, "document store ready");

    let state = AppState::new(Arc::new(PostService::new(store.clone())));
    let served = server::run_http(&settings, state).await;

    store.close().await?;
    served
}

async fn open_store(settings: &Settings) -> Result<Arc<dyn PostStore>> {
    match settings.store_backend {
        StoreBackend::Mongo => {
            let url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the mongo backend")?;
            let store =
                MongoPostStore::connect(url, &settings.database_name, &settings.posts_collection)
                    .await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("using the in-memory store, posts are lost on shutdown");
            Ok(Arc::new(InMemoryPostStore::new()))
        }
    }
}
