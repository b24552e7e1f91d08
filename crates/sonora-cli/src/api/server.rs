//! HTTP server setup and routing.

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use sonora_search::Engine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::handlers;

/// Shared application context passed to all handlers.
///
/// The engine is immutable once built, so handlers share it without locking.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub engine: Arc<Engine>,
    pub search_per_page: i64,
    pub recommend_per_page: i64,
    pub sample_size: usize,
}

/// Build the router with every endpoint attached.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/songs", get(handlers::list_songs))
        .route("/search", get(handlers::search_songs))
        .route("/recommend", post(handlers::recommend_song))
        .with_state(ctx)
        // Browser frontends are served from another origin
        .layer(CorsLayer::permissive())
}

/// Run the HTTP API server until the process is stopped.
pub async fn run(bind: &str, ctx: AppContext) -> Result<()> {
    let app = router(ctx);

    log::info!("Starting HTTP server on {bind}");

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind to {bind}"))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
