//! Car Finder catalog service library.
//!
//! This crate provides the HTTP service as a library, allowing the router
//! to be built and exercised from integration tests without binding a
//! fixed port.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the full application router.
///
/// Shared by `main` and the integration tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. The catalog is embedded, so
/// there are no dependencies to probe.
async fn health() -> &'static str {
    "ok"
}
