//! Typed HTTP client for the catalog endpoints.
//!
//! Thin request/await wrappers with no retry, no caching, and no in-flight
//! de-duplication - acceptable for a low-stakes read-only catalog. The one
//! piece of real logic is the error split: a 404 on the by-id endpoint is
//! the domain-level "not found" outcome, distinct from transport failure.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::instrument;

use car_finder_core::types::{Car, CarId};

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested car does not exist. Not a failure; rendered as a
    /// "not found" message, never as a retryable error.
    #[error("Car not found")]
    NotFound,
    /// The request itself failed (connection, body, decoding).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with an unexpected status.
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
}

/// Client for the two read-only catalog endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the service at `base_url`
    /// (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the entire catalog (`GET /cars`).
    ///
    /// # Errors
    ///
    /// Returns `Transport` or `Status` on failure; the endpoint has no
    /// domain-level error outcomes.
    #[instrument(skip(self))]
    pub async fn list_cars(&self) -> Result<Vec<Car>, ApiError> {
        let response = self
            .http
            .get(format!("{}/cars", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Fetch a single car (`GET /cars/{id}`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a well-formed but absent id, `Transport` or
    /// `Status` for infrastructure failure.
    #[instrument(skip(self))]
    pub async fn get_car(&self, id: &CarId) -> Result<Car, ApiError> {
        let response = self
            .http
            .get(format!("{}/cars/{}", self.base_url, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::Status(status)),
            _ => Ok(response.json().await?),
        }
    }
}
