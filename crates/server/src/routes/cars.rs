//! Catalog retrieval endpoints.
//!
//! Two read-only endpoints backed by the in-memory catalog:
//! - `GET /cars` - every record, dataset order
//! - `GET /cars/{id}` - a single record, or 404 with
//!   `{"error": "Car not found"}`
//!
//! Both simulate a fixed latency before responding (configurable, 500 ms
//! by default) so client loading states are exercised in development.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use car_finder_core::types::{Car, CarId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List every car in the catalog.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Car>> {
    state.simulate_latency().await;
    Json(state.catalog().cars().to_vec())
}

/// Fetch a single car by id.
#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>> {
    state.simulate_latency().await;

    let id = CarId::new(id);
    state
        .catalog()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Car not found".to_owned()))
}

/// Create the catalog routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list))
        .route("/cars/{id}", get(get_by_id))
}
