//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, applies migrations and runs the Axum server
//! until Ctrl+C.

use crate::config::Config;
use crate::domain::repositories::{ListingRepository, ReviewRepository};
use crate::infrastructure::persistence::{MemoryStore, PgListingRepository, PgReviewRepository};
use crate::routes::app;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory store when
///   no database is configured
/// - Application state and router
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (listings, reviews) = storage(&config).await?;
    let state = AppState::new(listings, reviews);

    let app = app(state, &config.static_dir, &config.uploads_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the repositories for the configured backend.
async fn storage(
    config: &Config,
) -> Result<(Arc<dyn ListingRepository>, Arc<dyn ReviewRepository>)> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
        let store = Arc::new(MemoryStore::new());
        let listings: Arc<dyn ListingRepository> = store.clone();
        let reviews: Arc<dyn ReviewRepository> = store;
        return Ok((listings, reviews));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let listings: Arc<dyn ListingRepository> = Arc::new(PgListingRepository::new(pool.clone()));
    let reviews: Arc<dyn ReviewRepository> = Arc::new(PgReviewRepository::new(pool));
    Ok((listings, reviews))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
