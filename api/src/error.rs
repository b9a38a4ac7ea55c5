//! API error types and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fiat2btc_rates::UpstreamError;
use thiserror::Error;

use crate::response::ErrorBody;

/// Errors surfaced by the conversion endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or unsupported input, rejected before the core runs.
    #[error("{0}")]
    Validation(String),

    /// Failure fetching or normalizing the exchange-rate snapshot. Fails
    /// the whole request; never substituted with stale or default data.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            ApiError::Upstream(err) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody::with_details(
                    "Failed to fetch or compute exchange rates.",
                    err.to_string(),
                ),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
