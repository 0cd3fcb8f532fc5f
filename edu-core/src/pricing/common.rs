//! Common helpers for cart pricing.
//!
//! Catalog prices are whole-won amounts written with thousands separators
//! (`"150,000"`). Discounted prices are rounded per line to the nearest won
//! using half-up rounding before any summing takes place.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a catalog price string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price '{input}': {reason}")]
pub struct ParsePriceError {
    pub input: String,
    pub reason: String,
}

/// Normalizes a price string: trims whitespace and removes every comma.
fn normalize_price_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a comma-grouped price string into a [`Decimal`].
///
/// Unlike free-form form input, an empty price is never valid here: a
/// catalog service without a price cannot be totalled.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use edu_core::pricing::common::parse_price;
///
/// assert_eq!(parse_price("10,000").unwrap(), dec!(10000));
/// assert_eq!(parse_price("1,234,567").unwrap(), dec!(1234567));
/// assert!(parse_price("").is_err());
/// assert!(parse_price("만원").is_err());
/// ```
pub fn parse_price(s: &str) -> Result<Decimal, ParsePriceError> {
    let normalized = normalize_price_input(s);
    if normalized.is_empty() {
        return Err(ParsePriceError {
            input: s.to_string(),
            reason: "empty price".to_string(),
        });
    }
    let price: Decimal = normalized.parse().map_err(|e: rust_decimal::Error| {
        tracing::warn!(input = %s, "invalid price: {}", e);
        ParsePriceError {
            input: s.to_string(),
            reason: e.to_string(),
        }
    })?;
    if price.is_sign_negative() {
        return Err(ParsePriceError {
            input: s.to_string(),
            reason: "negative price".to_string(),
        });
    }
    Ok(price)
}

/// Rounds a value to a whole won using half-up rounding (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use edu_core::pricing::common::round_won;
///
/// assert_eq!(round_won(dec!(8999.4)), dec!(8999));
/// assert_eq!(round_won(dec!(8999.5)), dec!(9000));
/// ```
pub fn round_won(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `price × (1 − discount)` rounded to a whole won.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use edu_core::pricing::common::discounted_price;
///
/// assert_eq!(discounted_price(dec!(10000), dec!(0.2)), dec!(8000));
/// assert_eq!(discounted_price(dec!(99000), dec!(0.15)), dec!(84150));
/// ```
pub fn discounted_price(
    price: Decimal,
    discount: Decimal,
) -> Decimal {
    round_won(price * (Decimal::ONE - discount))
}

/// Returns `true` when `discount` is a usable fraction of the list price.
pub fn is_valid_discount(discount: Decimal) -> bool {
    discount >= Decimal::ZERO && discount <= Decimal::ONE
}

/// Formats an amount with thousands separators and the won suffix.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use edu_core::pricing::common::format_won;
///
/// assert_eq!(format_won(dec!(16000)), "16,000원");
/// assert_eq!(format_won(dec!(0)), "0원");
/// ```
pub fn format_won(value: Decimal) -> String {
    let normalized = value.normalize();
    let negative = normalized.is_sign_negative() && !normalized.is_zero();
    let text = normalized.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}원"),
        None => format!("{sign}{grouped}원"),
    }
}
