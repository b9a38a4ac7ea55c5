//! fiat2btc HTTP API
//!
//! The HTTP edge of the fiat2btc service: query validation, the conversion
//! endpoint, error-to-status mapping, and environment configuration.

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod validate;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{app_router, AppState};
