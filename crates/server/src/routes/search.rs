//! Search view endpoint.
//!
//! `GET /search` runs the filter-sort-paginate pipeline over the catalog.
//! The response is a pure function of the query string, so reloading a URL
//! with the same parameters reproduces the identical visible result set
//! and page.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use car_finder_core::search::{self, FilterSpec};
use car_finder_core::types::Car;

use crate::state::AppState;

/// Search view response.
///
/// Carries the visible slice plus the facet lists the filter dropdowns are
/// populated from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub cars: Vec<Car>,
    /// Effective page; 1 if the requested page was out of range.
    pub page: u32,
    pub total_pages: u32,
    pub total_count: usize,
    pub brands: Vec<String>,
    pub fuel_types: Vec<String>,
}

/// Run the search pipeline for the given query parameters.
///
/// All parameters are optional strings, coerced defensively; there is no
/// validation-error path by design.
#[instrument(skip(state))]
pub async fn search_view(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<SearchResponse> {
    let spec = FilterSpec::from_pairs(params);
    let results = search::search(state.catalog().cars(), &spec);

    Json(SearchResponse {
        cars: results.cars,
        page: results.page,
        total_pages: results.total_pages,
        total_count: results.total_count,
        brands: state.catalog().brands(),
        fuel_types: state.catalog().fuel_types(),
    })
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_view))
}
