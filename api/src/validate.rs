//! Query validation for the conversion endpoint.
//!
//! Runs before the rate pipeline: the core trusts that `amount` is a
//! positive decimal string without sign or exponent and that `currency` is
//! one of the supported units.

use fiat2btc_common::Currency;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::ApiError;

/// Digits with an optional fractional part. No sign, no exponent.
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("amount pattern compiles"));

/// Raw query parameters of the conversion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionQuery {
    pub currency: Option<String>,
    pub amount: Option<String>,
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub currency: Currency,
    /// The amount exactly as supplied, trimmed.
    pub amount: String,
}

/// Validate currency and amount query parameters.
pub fn validate(query: &ConversionQuery) -> Result<ConversionRequest, ApiError> {
    let currency = query
        .currency
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Query param 'currency' is required.".to_string()))?;

    let currency = currency.to_uppercase().parse::<Currency>().map_err(|_| {
        ApiError::Validation("Query param 'currency' must be one of: USD, GBP, JPY.".to_string())
    })?;

    let amount = query
        .amount
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Query param 'amount' is required.".to_string()))?;

    let amount = amount.trim();

    if amount.is_empty() {
        return Err(ApiError::Validation(
            "Query param 'amount' must be a positive numeric string.".to_string(),
        ));
    }

    if !AMOUNT_PATTERN.is_match(amount) {
        return Err(ApiError::Validation(
            "Query param 'amount' must be a positive numeric string (e.g. 10 or 10.5).".to_string(),
        ));
    }

    // The pattern admits no sign or exponent, so positivity reduces to the
    // presence of a nonzero digit.
    if !amount.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        return Err(ApiError::Validation(
            "Query param 'amount' must be greater than 0.".to_string(),
        ));
    }

    Ok(ConversionRequest {
        currency,
        amount: amount.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(currency: Option<&str>, amount: Option<&str>) -> ConversionQuery {
        ConversionQuery {
            currency: currency.map(str::to_string),
            amount: amount.map(str::to_string),
        }
    }

    fn message(err: ApiError) -> String {
        match err {
            ApiError::Validation(message) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_request() {
        let request = validate(&query(Some("GBP"), Some("10.5"))).unwrap();
        assert_eq!(request.currency, Currency::Gbp);
        assert_eq!(request.amount, "10.5");
    }

    #[test]
    fn test_currency_is_uppercased() {
        let request = validate(&query(Some("jpy"), Some("3"))).unwrap();
        assert_eq!(request.currency, Currency::Jpy);
    }

    #[test]
    fn test_amount_is_trimmed() {
        let request = validate(&query(Some("USD"), Some("  42  "))).unwrap();
        assert_eq!(request.amount, "42");
    }

    #[test]
    fn test_missing_currency() {
        let err = validate(&query(None, Some("1"))).unwrap_err();
        assert_eq!(message(err), "Query param 'currency' is required.");
    }

    #[test]
    fn test_unsupported_currency() {
        let err = validate(&query(Some("EUR"), Some("1"))).unwrap_err();
        assert_eq!(
            message(err),
            "Query param 'currency' must be one of: USD, GBP, JPY."
        );
    }

    #[test]
    fn test_missing_amount() {
        let err = validate(&query(Some("USD"), None)).unwrap_err();
        assert_eq!(message(err), "Query param 'amount' is required.");
    }

    #[test]
    fn test_blank_amount() {
        let err = validate(&query(Some("USD"), Some("   "))).unwrap_err();
        assert_eq!(
            message(err),
            "Query param 'amount' must be a positive numeric string."
        );
    }

    #[test]
    fn test_malformed_amounts() {
        for bad in ["1e5", "-3", "+3", "1.", ".5", "10,5", "NaN", "0x10"] {
            let err = validate(&query(Some("USD"), Some(bad))).unwrap_err();
            assert_eq!(
                message(err),
                "Query param 'amount' must be a positive numeric string (e.g. 10 or 10.5).",
                "amount {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_amount() {
        for zero in ["0", "0.000", "00"] {
            let err = validate(&query(Some("USD"), Some(zero))).unwrap_err();
            assert_eq!(message(err), "Query param 'amount' must be greater than 0.");
        }
    }
}
