//! Time helpers for the fiat2btc service.
//!
//! All freshness arithmetic works in whole seconds since the unix epoch so
//! that cache and resolver operations can take the clock as an argument.

use chrono::Utc;

/// Seconds since the unix epoch.
pub type UnixSeconds = i64;

/// Current wall-clock time in unix seconds.
pub fn now_unix() -> UnixSeconds {
    Utc::now().timestamp()
}

/// Seconds from `now_unix` until `expires_at_unix`, clamped at zero.
pub fn seconds_until(expires_at_unix: UnixSeconds, now_unix: UnixSeconds) -> i64 {
    (expires_at_unix - now_unix).max(0)
}
