//! Route definitions for the HaikuHub HTTP API.
//!
//! All API routes are organized by domain and mounted under `/api`.
//! The router receives `ApiState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::state::ApiState;

/// Build the host router: pages, haiku API, plugin listing, health, and
/// static assets.
pub fn build_router(state: ApiState) -> Router {
    let static_dir = state.config.library.static_dir.clone();

    let api_routes = Router::new()
        .merge(haiku_routes())
        .merge(plugin_routes())
        .merge(health_routes());

    Router::new()
        .route("/", get(handlers::pages::index))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Haiku listing, random pick, and lookup by index.
fn haiku_routes() -> Router<ApiState> {
    // `/haikus/random` is declared ahead of `/haikus/{id}`; the static
    // segment must win over the capture.
    Router::new()
        .route("/haikus", get(handlers::haikus::list_haikus))
        .route("/haikus/random", get(handlers::haikus::random_haiku))
        .route("/haikus/{id}", get(handlers::haikus::get_haiku))
}

/// Plugin registry listing.
fn plugin_routes() -> Router<ApiState> {
    Router::new().route("/plugins", get(handlers::plugins::list_plugins))
}

/// Health check endpoint.
fn health_routes() -> Router<ApiState> {
    Router::new().route("/health", get(handlers::health::health))
}
