//! Normalized exchange-rate snapshots.

use fiat2btc_common::{Currency, UnixSeconds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Base currency of every upstream quote.
pub const SNAPSHOT_BASE: &str = "USD";

/// An immutable record of USD-denominated quotes captured from one
/// successful upstream response.
///
/// Each quote is "units of the target per one USD". Only the upstream
/// source constructs snapshots; nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Base currency code. Always "USD".
    pub base: String,
    /// Upstream-reported quote time, seconds since epoch.
    pub timestamp: UnixSeconds,
    /// BTC per one USD.
    pub btc: Decimal,
    /// GBP per one USD.
    pub gbp: Decimal,
    /// JPY per one USD.
    pub jpy: Decimal,
}

impl RateSnapshot {
    /// Create a snapshot from validated quotes.
    pub fn new(timestamp: UnixSeconds, btc: Decimal, gbp: Decimal, jpy: Decimal) -> Self {
        Self {
            base: SNAPSHOT_BASE.to_string(),
            timestamp,
            btc,
            gbp,
            jpy,
        }
    }

    /// BTC per one unit of `currency`, derived through the USD base.
    ///
    /// USD is the snapshot's base, so its rate is the BTC quote itself.
    /// GBP and JPY are cross-rates: BTC quote divided by the currency's own
    /// USD quote. There is no direct GBP-BTC or JPY-BTC upstream quote.
    pub fn btc_per_unit(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Usd => self.btc,
            Currency::Gbp => self.btc / self.gbp,
            Currency::Jpy => self.btc / self.jpy,
        }
    }
}
