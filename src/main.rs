//! ¿Es viernes hoy? - web server
//!
//! Serves the Friday page, the visit ingest endpoint and the statistics
//! dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use isitfriday_server::{
    build_router,
    config::AppConfig,
    models::manifest::GalleryManifest,
    repository::Repository,
    services::{timezone::HttpTimezoneLookup, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("isitfriday_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting isitfriday-server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool. Tables are created on demand, so the
    // page itself stays up while the database is unreachable.
    let pool = Repository::pool_options(&config.database)
        .connect_lazy(&config.database.url)
        .context("Invalid database URL")?;

    // Gallery manifest, read once
    let manifest_path = config.manifest_path();
    let manifest = match GalleryManifest::load(&manifest_path).await {
        Ok(manifest) => {
            tracing::info!("Loaded gallery manifest from {}", manifest_path.display());
            Some(manifest)
        }
        Err(e) => {
            tracing::error!("Gallery manifest unavailable, the page will show an error: {}", e);
            None
        }
    };

    let lookup = HttpTimezoneLookup::new(&config.timezone)?;

    let addr = SocketAddr::new(
        config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid host address {:?}", config.server.host))?,
        config.server.port,
    );

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, &config, Arc::new(lookup), manifest);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = build_router(state)?;

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
