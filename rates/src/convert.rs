//! Decimal conversion and presentation formatting.
//!
//! Two separate precision contracts live here: the BTC amount is truncated
//! toward zero to exactly 8 fractional digits, while the rate echoed to the
//! caller is formatted to 12 significant digits. The amount calculation
//! always runs at full internal precision before its own truncation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits in a formatted BTC amount.
pub const BTC_AMOUNT_SCALE: u32 = 8;

/// Significant digits used when echoing a rate to the caller.
pub const RATE_SIGNIFICANT_DIGITS: u32 = 12;

/// Convert a validated amount string at the given per-unit rate.
///
/// The amount is parsed exactly, multiplied at full decimal precision, then
/// truncated toward zero to 8 fractional digits and formatted fixed-point
/// with exactly 8 digits after the point. Truncation, never round-up: the
/// BTC amount owed is never overstated.
pub fn convert(amount: &str, btc_per_unit: Decimal) -> Result<String, rust_decimal::Error> {
    let amount = Decimal::from_str_exact(amount)?;
    let truncated =
        (amount * btc_per_unit).round_dp_with_strategy(BTC_AMOUNT_SCALE, RoundingStrategy::ToZero);
    Ok(format!("{:.*}", BTC_AMOUNT_SCALE as usize, truncated))
}

/// Format a rate to 12 significant digits, trailing zeros trimmed.
pub fn format_rate(btc_per_unit: Decimal) -> String {
    to_significant_digits(btc_per_unit, RATE_SIGNIFICANT_DIGITS)
        .normalize()
        .to_string()
}

/// Round to at most `figures` significant digits, half away from zero.
fn to_significant_digits(value: Decimal, figures: u32) -> Decimal {
    if value.is_zero() {
        return Decimal::ZERO;
    }

    let digits = value.mantissa().unsigned_abs().to_string().len() as i64;
    let drop = digits - i64::from(figures);
    if drop <= 0 {
        return value;
    }

    let target = i64::from(value.scale()) - drop;
    if target >= 0 {
        value.round_dp_with_strategy(target as u32, RoundingStrategy::MidpointAwayFromZero)
    } else {
        // Rounding left of the decimal point: shift, round, shift back.
        let shift = Decimal::from_i128_with_scale(10i128.pow(-target as u32), 0);
        (value / shift).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_truncates_ninth_digit() {
        // Product is 20.123456789; the ninth digit is dropped, not rounded.
        assert_eq!(convert("10.0617283945", dec!(2)).unwrap(), "20.12345678");
    }

    #[test]
    fn test_convert_never_rounds_up() {
        // 0.1 * 0.999999999 = 0.0999999999 -> truncated, not 0.10000000.
        assert_eq!(convert("0.1", dec!(0.999999999)).unwrap(), "0.09999999");
    }

    #[test]
    fn test_convert_pads_trailing_zeros() {
        assert_eq!(convert("1", dec!(0.5)).unwrap(), "0.50000000");
        assert_eq!(convert("2", dec!(3)).unwrap(), "6.00000000");
    }

    #[test]
    fn test_convert_cross_rate_end_to_end() {
        // 100 GBP against snapshot quotes BTC=0.000023, GBP=0.79.
        let rate = dec!(0.000023) / dec!(0.79);
        assert_eq!(convert("100", rate).unwrap(), "0.00291139");
    }

    #[test]
    fn test_convert_rejects_unparseable_amount() {
        assert!(convert("not-a-number", dec!(1)).is_err());
        assert!(convert("", dec!(1)).is_err());
    }

    #[test]
    fn test_format_rate_rounds_to_twelve_significant_digits() {
        let rate = dec!(0.000023) / dec!(0.79);
        assert_eq!(format_rate(rate), "0.0000291139240506");
    }

    #[test]
    fn test_format_rate_keeps_short_values_unchanged() {
        assert_eq!(format_rate(dec!(0.000023)), "0.000023");
    }

    #[test]
    fn test_format_rate_trims_trailing_zeros() {
        assert_eq!(format_rate(dec!(0.500000)), "0.5");
    }

    #[test]
    fn test_format_rate_rounds_half_away_from_zero() {
        assert_eq!(format_rate(dec!(0.1234567890125)), "0.123456789013");
        assert_eq!(format_rate(dec!(0.1234567890123)), "0.123456789012");
    }

    #[test]
    fn test_format_rate_rounds_left_of_decimal_point() {
        assert_eq!(format_rate(dec!(123456789012345)), "123456789012000");
    }

    #[test]
    fn test_format_rate_zero() {
        assert_eq!(format_rate(Decimal::ZERO), "0");
    }
}
