//! fiat2btc Rate Pipeline
//!
//! Rate resolution and conversion for the fiat2btc service.
//!
//! # Features
//!
//! - Single-slot snapshot cache with a fixed 30-minute TTL
//! - exchangerate.host client with response normalization
//! - Cross-rate derivation through the USD base
//! - Exact decimal conversion with truncate-down presentation rounding
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fiat2btc_common::{now_unix, Currency};
//! use fiat2btc_rates::{convert, ExchangeRateHostSource, RateResolver};
//!
//! let source = Arc::new(ExchangeRateHostSource::new(access_key));
//! let resolver = RateResolver::new(source);
//!
//! let resolved = resolver.resolve(Currency::Gbp, now_unix()).await?;
//! let btc = convert("100", resolved.btc_per_unit)?;
//! ```

pub mod cache;
pub mod convert;
pub mod error;
pub mod resolver;
pub mod snapshot;
pub mod upstream;

pub use cache::{CacheEntry, SnapshotCache, SNAPSHOT_TTL_SECONDS};
pub use convert::{convert, format_rate};
pub use error::{RateResult, UpstreamError};
pub use resolver::{RateResolver, ResolvedRate, ServedFrom};
pub use snapshot::RateSnapshot;
pub use upstream::{ExchangeRateHostSource, SnapshotSource};
