//! Single-slot snapshot cache with TTL freshness.

use fiat2btc_common::{seconds_until, UnixSeconds};
use parking_lot::RwLock;
use tracing::debug;

use crate::snapshot::RateSnapshot;

/// Snapshot time-to-live (30 minutes), counted from the fetch time.
///
/// Independent of the snapshot's own upstream-reported timestamp.
pub const SNAPSHOT_TTL_SECONDS: i64 = 30 * 60;

/// One cached snapshot together with its freshness window.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached snapshot.
    pub snapshot: RateSnapshot,
    /// Wall-clock seconds when the snapshot was stored.
    pub fetched_at_unix: UnixSeconds,
    /// Hard freshness cutoff: `fetched_at_unix + SNAPSHOT_TTL_SECONDS`.
    pub expires_at_unix: UnixSeconds,
}

impl CacheEntry {
    fn new(snapshot: RateSnapshot, fetched_at_unix: UnixSeconds) -> Self {
        Self {
            snapshot,
            fetched_at_unix,
            expires_at_unix: fetched_at_unix + SNAPSHOT_TTL_SECONDS,
        }
    }

    /// Usable strictly before the expiry instant.
    pub fn is_usable(&self, now_unix: UnixSeconds) -> bool {
        now_unix < self.expires_at_unix
    }

    /// Seconds of freshness left, clamped at zero.
    pub fn remaining_seconds(&self, now_unix: UnixSeconds) -> i64 {
        seconds_until(self.expires_at_unix, now_unix)
    }
}

/// Process-local cache holding at most one snapshot.
///
/// Expired entries are never served, not even partially; they are logically
/// discarded and replaced by the next store. The lock guards the single
/// read-then-maybe-write path; two concurrent expired readers may both
/// trigger a fetch, and the last store wins.
pub struct SnapshotCache {
    slot: RwLock<Option<CacheEntry>>,
}

impl SnapshotCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Get the current entry if it is still fresh at `now_unix`.
    pub fn get_usable(&self, now_unix: UnixSeconds) -> Option<CacheEntry> {
        match self.slot.read().as_ref() {
            Some(entry) if entry.is_usable(now_unix) => {
                debug!(expires_at = entry.expires_at_unix, "Snapshot cache hit");
                Some(entry.clone())
            }
            Some(entry) => {
                debug!(expired_at = entry.expires_at_unix, "Snapshot cache entry expired");
                None
            }
            None => {
                debug!("Snapshot cache empty");
                None
            }
        }
    }

    /// Store a snapshot, fully replacing any prior entry.
    pub fn store(&self, snapshot: RateSnapshot, fetched_at_unix: UnixSeconds) -> CacheEntry {
        let entry = CacheEntry::new(snapshot, fetched_at_unix);
        *self.slot.write() = Some(entry.clone());
        entry
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_snapshot(timestamp: i64) -> RateSnapshot {
        RateSnapshot::new(timestamp, dec!(0.000023), dec!(0.79), dec!(149.5))
    }

    #[test]
    fn test_empty_cache_misses() {
        let cache = SnapshotCache::new();
        assert!(cache.get_usable(1_700_000_000).is_none());
    }

    #[test]
    fn test_store_and_get() {
        let cache = SnapshotCache::new();
        let entry = cache.store(make_snapshot(1_700_000_000), 1_700_000_100);

        assert_eq!(entry.fetched_at_unix, 1_700_000_100);
        assert_eq!(entry.expires_at_unix, 1_700_000_100 + SNAPSHOT_TTL_SECONDS);

        let cached = cache.get_usable(1_700_000_101).unwrap();
        assert_eq!(cached.snapshot.timestamp, 1_700_000_000);
    }

    #[test]
    fn test_freshness_boundary() {
        let t0 = 1_700_000_000;
        let cache = SnapshotCache::new();
        cache.store(make_snapshot(t0), t0);

        // Fresh one second before expiry, gone at the expiry instant.
        assert!(cache.get_usable(t0 + SNAPSHOT_TTL_SECONDS - 1).is_some());
        assert!(cache.get_usable(t0 + SNAPSHOT_TTL_SECONDS).is_none());
        assert!(cache.get_usable(t0 + SNAPSHOT_TTL_SECONDS + 1).is_none());
    }

    #[test]
    fn test_store_replaces_prior_entry() {
        let cache = SnapshotCache::new();
        cache.store(make_snapshot(1_700_000_000), 1_700_000_000);
        cache.store(make_snapshot(1_700_001_000), 1_700_001_000);

        let cached = cache.get_usable(1_700_001_001).unwrap();
        assert_eq!(cached.snapshot.timestamp, 1_700_001_000);
        assert_eq!(cached.fetched_at_unix, 1_700_001_000);
    }

    #[test]
    fn test_remaining_seconds_clamps_at_zero() {
        let t0 = 1_700_000_000;
        let cache = SnapshotCache::new();
        let entry = cache.store(make_snapshot(t0), t0);

        assert_eq!(entry.remaining_seconds(t0), SNAPSHOT_TTL_SECONDS);
        assert_eq!(entry.remaining_seconds(t0 + 100), SNAPSHOT_TTL_SECONDS - 100);
        assert_eq!(entry.remaining_seconds(t0 + SNAPSHOT_TTL_SECONDS + 50), 0);
    }
}
