//! fiat2btc Common Types
//!
//! This crate contains the small set of types shared between the rate
//! pipeline and the HTTP edge: the supported-currency enum and unix-time
//! helpers.

pub mod currency;
pub mod time;

pub use currency::*;
pub use time::*;
