//! Conversions from raw numbers into monetary amounts.
//!
//! Amounts are carried as [`Decimal`] everywhere past the structural gate,
//! so every comparison is numeric and NaN or infinity cannot appear.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde_json::Value;

use crate::error::AmountError;

/// Converts a float into a decimal amount, rejecting NaN and infinities.
pub fn from_f64(value: f64) -> Result<Decimal, AmountError> {
    if !value.is_finite() {
        return Err(AmountError::NotFinite);
    }
    Decimal::from_f64(value).ok_or(AmountError::OutOfRange)
}

/// Converts a JSON value into a decimal amount.
///
/// Only JSON numbers are accepted. Numeric strings such as `"500"` are
/// rejected.
pub fn from_json(value: &Value) -> Result<Decimal, AmountError> {
    let Value::Number(number) = value else {
        return Err(AmountError::NotNumeric);
    };

    if let Some(i) = number.as_i64() {
        return Ok(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Ok(Decimal::from(u));
    }

    // Parse the shortest textual form so 0.1 stays 0.1 rather than the
    // nearest binary fraction.
    let text = number.to_string();
    if let Ok(d) = Decimal::from_str(&text) {
        return Ok(d);
    }
    if let Ok(d) = Decimal::from_scientific(&text) {
        return Ok(d);
    }
    match number.as_f64() {
        Some(f) => from_f64(f),
        None => Err(AmountError::NotFinite),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(from_f64(f64::NAN), Err(AmountError::NotFinite));
        assert_eq!(from_f64(f64::INFINITY), Err(AmountError::NotFinite));
        assert_eq!(from_f64(f64::NEG_INFINITY), Err(AmountError::NotFinite));
    }

    #[test]
    fn test_from_f64_out_of_range() {
        assert_eq!(from_f64(1e300), Err(AmountError::OutOfRange));
    }

    #[test]
    fn test_from_json_integer_and_fraction() {
        assert_eq!(from_json(&json!(500)).unwrap(), dec!(500));
        assert_eq!(from_json(&json!(0.1)).unwrap(), dec!(0.1));
        assert_eq!(from_json(&json!(99.99)).unwrap(), dec!(99.99));
    }

    #[test]
    fn test_from_json_rejects_text() {
        assert_eq!(from_json(&json!("500")), Err(AmountError::NotNumeric));
        assert_eq!(from_json(&json!(null)), Err(AmountError::NotNumeric));
        assert_eq!(from_json(&json!([1])), Err(AmountError::NotNumeric));
    }
}
