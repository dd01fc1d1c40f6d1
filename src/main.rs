use std::sync::Arc;

use title_recommender::{
    catalog::CatalogStore,
    config::Config,
    routes::{create_router, AppState},
    services::RecommendationService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = Arc::new(CatalogStore::from_path(config.catalog_path.clone()));
    if config.eager_load && store.load().await.is_err() {
        tracing::warn!("Catalog warm-up failed, the first request will retry");
    }

    let state = AppState::new(RecommendationService::new(store));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
