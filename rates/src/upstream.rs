//! Upstream provider client and response normalization.
//!
//! exchangerate.host `/live` endpoint notes (free plan):
//! - envelope carries `source` instead of `base` and `quotes` instead of
//!   `rates`
//! - quote keys concatenate base and target codes: `USDBTC`, `USDGBP`,
//!   `USDJPY`
//! - `source` may be omitted entirely on free-tier responses
//!
//! The translation into [`RateSnapshot`] is internal to this module and
//! invisible past it.

use async_trait::async_trait;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::error::{RateResult, UpstreamError};
use crate::snapshot::RateSnapshot;

/// Default upstream endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.exchangerate.host/live";

/// Maximum number of characters of an upstream error body kept for
/// diagnostics.
const ERROR_BODY_LIMIT: usize = 500;

/// A source of validated, normalized rate snapshots.
///
/// One call maps to at most one upstream request: no retries, no backoff.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Fetch a fresh snapshot.
    async fn fetch(&self) -> RateResult<RateSnapshot>;
}

/// exchangerate.host `/live` client.
pub struct ExchangeRateHostSource {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl ExchangeRateHostSource {
    /// Create a client for the default endpoint.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: access_key.into(),
        }
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SnapshotSource for ExchangeRateHostSource {
    fn name(&self) -> &str {
        "exchangerate.host"
    }

    async fn fetch(&self) -> RateResult<RateSnapshot> {
        debug!(endpoint = %self.endpoint, "Fetching live rates");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("access_key", self.access_key.as_str())])
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        parse_live_body(&body)
    }
}

/// Normalize a `/live` response body into a snapshot.
///
/// An absent or non-string `source` defaults to "USD"; any other explicit
/// value is a contract violation. Quote and timestamp fields must be finite
/// numbers, and quotes must be positive.
pub(crate) fn parse_live_body(body: &str) -> RateResult<RateSnapshot> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| UpstreamError::MalformedBody(e.to_string()))?;

    let timestamp = json
        .get("timestamp")
        .and_then(Value::as_i64)
        .ok_or_else(|| UpstreamError::MissingField("timestamp".to_string()))?;

    let source = match json.get("source") {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        _ => "USD",
    };

    let quotes = json
        .get("quotes")
        .and_then(Value::as_object)
        .ok_or_else(|| UpstreamError::MalformedBody("missing 'quotes' object".to_string()))?;

    let btc = read_quote(quotes, "USDBTC")?;
    let gbp = read_quote(quotes, "USDGBP")?;
    let jpy = read_quote(quotes, "USDJPY")?;

    if source != "USD" {
        return Err(UpstreamError::UnexpectedBase(source.to_string()));
    }

    Ok(RateSnapshot::new(timestamp, btc, gbp, jpy))
}

fn read_quote(quotes: &serde_json::Map<String, Value>, key: &str) -> RateResult<Decimal> {
    let value = quotes
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| UpstreamError::MissingField(key.to_string()))?;

    if value <= 0.0 {
        return Err(UpstreamError::InvalidQuote {
            field: key.to_string(),
            value,
        });
    }

    Decimal::from_f64(value).ok_or(UpstreamError::InvalidQuote {
        field: key.to_string(),
        value,
    })
}

fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

/// Snapshot source returning a fixed snapshot, counting fetches.
#[cfg(any(test, feature = "test-utils"))]
pub struct StaticSnapshotSource {
    snapshot: RateSnapshot,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticSnapshotSource {
    /// Create a source that always returns `snapshot`.
    pub fn new(snapshot: RateSnapshot) -> Self {
        Self {
            snapshot,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of fetches performed so far.
    pub fn fetch_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl SnapshotSource for StaticSnapshotSource {
    fn name(&self) -> &str {
        "STATIC"
    }

    async fn fetch(&self) -> RateResult<RateSnapshot> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }
}

/// Snapshot source that always fails with an upstream status error.
#[cfg(any(test, feature = "test-utils"))]
pub struct FailingSnapshotSource;

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl SnapshotSource for FailingSnapshotSource {
    fn name(&self) -> &str {
        "FAILING"
    }

    async fn fetch(&self) -> RateResult<RateSnapshot> {
        Err(UpstreamError::Status {
            status: 503,
            body: "Service Unavailable".to_string(),
        })
    }
}
