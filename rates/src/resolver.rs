//! Cache-or-fetch rate resolution.

use std::sync::Arc;

use fiat2btc_common::{Currency, UnixSeconds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::cache::{SnapshotCache, SNAPSHOT_TTL_SECONDS};
use crate::error::RateResult;
use crate::upstream::SnapshotSource;

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServedFrom {
    Cache,
    Upstream,
}

impl std::fmt::Display for ServedFrom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServedFrom::Cache => write!(f, "cache"),
            ServedFrom::Upstream => write!(f, "upstream"),
        }
    }
}

/// A per-unit BTC rate resolved for one request, with caching metadata.
#[derive(Debug, Clone)]
pub struct ResolvedRate {
    /// BTC per one unit of the requested currency, full internal precision.
    pub btc_per_unit: Decimal,
    /// Upstream-reported snapshot time.
    pub as_of_unix: UnixSeconds,
    /// Whether the snapshot came from the cache or a fresh fetch.
    pub served_from: ServedFrom,
    /// When the snapshot was stored.
    pub fetched_at_unix: UnixSeconds,
    /// Freshness seconds left on the snapshot.
    pub ttl_seconds_remaining: i64,
}

/// Resolves BTC-per-unit rates through the cache-or-fetch pipeline.
pub struct RateResolver {
    source: Arc<dyn SnapshotSource>,
    cache: SnapshotCache,
}

impl RateResolver {
    /// Create a resolver with an empty cache.
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            source,
            cache: SnapshotCache::new(),
        }
    }

    /// Resolve the BTC rate for `currency` at `now_unix`.
    ///
    /// A usable cache entry is served as-is. Otherwise one upstream fetch
    /// runs; its snapshot replaces the cache slot with `fetched_at =
    /// now_unix`. A fetch failure propagates unchanged — an expired entry is
    /// a hard cutoff, never a fallback.
    #[instrument(skip(self), fields(currency = %currency))]
    pub async fn resolve(&self, currency: Currency, now_unix: UnixSeconds) -> RateResult<ResolvedRate> {
        if let Some(entry) = self.cache.get_usable(now_unix) {
            debug!("Serving cached snapshot");
            return Ok(ResolvedRate {
                btc_per_unit: entry.snapshot.btc_per_unit(currency),
                as_of_unix: entry.snapshot.timestamp,
                served_from: ServedFrom::Cache,
                fetched_at_unix: entry.fetched_at_unix,
                ttl_seconds_remaining: entry.remaining_seconds(now_unix),
            });
        }

        let snapshot = self.source.fetch().await?;
        let entry = self.cache.store(snapshot, now_unix);

        info!(
            source = self.source.name(),
            as_of = entry.snapshot.timestamp,
            expires_at = entry.expires_at_unix,
            "Fetched fresh snapshot"
        );

        Ok(ResolvedRate {
            btc_per_unit: entry.snapshot.btc_per_unit(currency),
            as_of_unix: entry.snapshot.timestamp,
            served_from: ServedFrom::Upstream,
            fetched_at_unix: entry.fetched_at_unix,
            ttl_seconds_remaining: SNAPSHOT_TTL_SECONDS,
        })
    }
}
