//! Rate pipeline error types.

use thiserror::Error;

/// Errors raised while fetching or normalizing an upstream rate snapshot.
///
/// Every variant fails the whole conversion request; there is no retry and
/// no fallback to stale data anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or transport failure reaching the provider.
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// Provider answered with a non-success HTTP status.
    /// The body is truncated for diagnostics.
    #[error("Upstream error {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not the expected JSON structure.
    #[error("Upstream response malformed: {0}")]
    MalformedBody(String),

    /// A required numeric field is missing or not a finite number.
    #[error("Upstream response missing numeric field '{0}'")]
    MissingField(String),

    /// A quote that is present and finite but unusable: zero, negative, or
    /// outside the representable decimal range.
    #[error("Upstream quote '{field}' is not a usable positive number: {value}")]
    InvalidQuote { field: String, value: f64 },

    /// Provider reported quotes against a base other than USD.
    #[error("Unexpected upstream source '{0}', expected 'USD'")]
    UnexpectedBase(String),
}

/// Result type for rate pipeline operations.
pub type RateResult<T> = Result<T, UpstreamError>;
