use std::sync::Arc;

use cinematch_api::{
    catalog::{CatalogProvider, JsonFileProvider},
    config::Config,
    routes::{create_router, AppState},
    services::{recommendations::Recommender, resolver::TitleResolver},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("cinematch_api=info,tower_http=info")
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Catalog and similarity matrix are loaded once and shared read-only
    let provider = JsonFileProvider::new(&config.catalog_path, &config.similarity_path);
    let recommender = Recommender::from_provider(
        &provider,
        TitleResolver::new(config.resolver()),
        config.ranking(),
    )
    .await?;

    let state = Arc::new(AppState::new(recommender, provider.name()));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        threshold = config.similarity_threshold,
        top_n = ?config.top_n,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
