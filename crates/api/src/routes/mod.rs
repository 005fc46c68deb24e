//! HTTP routes

pub mod health;
pub mod shorturl;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Create all routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let api_routes = Router::new()
        .route("/shorturl", post(shorturl::create_short_url))
        .route("/shorturl/:short_url", get(shorturl::redirect_short_url));

    // Front page and its assets
    let static_routes = Router::new()
        .route_service("/", ServeFile::new(state.config.index_page()))
        .nest_service("/public", ServeDir::new(&state.config.static_dir));

    Router::new()
        .merge(health_routes)
        .merge(static_routes)
        .nest("/api", api_routes)
        // 64KB request body limit
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
