//! Request-path error handling.
//!
//! All route handlers return `Result<T, AppError>`. The taxonomy is
//! deliberately small: the catalog is immutable and in-memory, so the only
//! failure a handler can produce is the domain-level "no such record".
//! Infrastructure errors (dataset load) are fatal at startup in `main` and
//! never reach a request; unexpected runtime errors surface through the
//! tracing layer, which forwards WARN/ERROR events to Sentry.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type for the catalog service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested identifier has no matching record. A normal outcome, not
    /// a failure; never captured to Sentry.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let message = match self {
            Self::NotFound(msg) => msg,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
