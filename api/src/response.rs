//! Wire shapes for the conversion endpoint.

use fiat2btc_common::Currency;
use fiat2btc_rates::ServedFrom;
use serde::Serialize;

/// Successful conversion response.
#[derive(Debug, Serialize)]
pub struct BtcResponse {
    pub input: InputInfo,
    pub btc: BtcInfo,
    pub rate: RateInfo,
    pub cache: CacheInfo,
}

/// Echo of the validated request.
#[derive(Debug, Serialize)]
pub struct InputInfo {
    pub currency: Currency,
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct BtcInfo {
    /// Fixed-point BTC amount with exactly 8 fractional digits.
    pub amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInfo {
    /// Rate formatted to 12 significant digits.
    pub btc_per_unit: String,
    /// Upstream-reported snapshot time.
    pub as_of_unix: i64,
    /// Rate provider identifier.
    pub source: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    pub ttl_seconds: i64,
    pub served_from: ServedFrom,
    pub fetched_at_unix: i64,
}

/// Error response envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                details: None,
            },
        }
    }

    /// Error with a message and diagnostic details.
    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                details: Some(details.into()),
            },
        }
    }
}
