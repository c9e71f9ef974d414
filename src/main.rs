use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reelshelf::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    services::{CoverLookup, DisabledCovers, GenreMapping, GoogleBooksCovers},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelshelf=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Catalogs are loaded once and shared read-only by every request
    let catalog = Catalog::load(&config.movies_path, &config.books_path)?;

    let cover_timeout = Duration::from_millis(config.cover_timeout_ms);
    let covers: Arc<dyn CoverLookup> = if config.covers_enabled {
        Arc::new(GoogleBooksCovers::new(
            config.cover_api_url.clone(),
            config.cover_api_key.clone(),
            cover_timeout,
        )?)
    } else {
        Arc::new(DisabledCovers)
    };

    tracing::info!(covers = covers.name(), "Cover lookup configured");

    let state = AppState::new(catalog, GenreMapping::default(), covers, cover_timeout);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
