//! Route handlers for the catalog service.

use axum::Router;

use crate::state::AppState;

pub mod cars;
pub mod search;

/// Combine all route modules into a single router.
pub fn routes() -> Router<AppState> {
    Router::new().merge(cars::router()).merge(search::router())
}
