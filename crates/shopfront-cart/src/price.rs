//! Price parsing and display.
//!
//! The catalog serves decimal prices as JSON strings (`"49.99"`) while
//! stored cart lines hold plain numbers. Everything here works in `f64`
//! dinars; amounts never leave the client.

use crate::error::PriceError;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Currency suffix used by [`format_price`].
pub const CURRENCY_CODE: &str = "RSD";

/// Parse a price from a JSON number or numeric string.
pub fn parse_price(value: &Value) -> Result<f64, PriceError> {
    let parsed = match value {
        Value::Null => return Err(PriceError::Missing),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| PriceError::NotNumeric(n.to_string()))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| PriceError::NotNumeric(s.clone()))?,
        other => return Err(PriceError::NotNumeric(other.to_string())),
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(PriceError::NotFinite)
    }
}

/// Treat a non-finite price as zero for summation.
pub fn price_or_zero(price: f64) -> f64 {
    if price.is_finite() {
        price
    } else {
        0.0
    }
}

/// Format an amount the way the storefront shows prices: `1.234,50 RSD`.
pub fn format_price(amount: f64) -> String {
    let amount = price_or_zero(amount);
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped},{fraction:02} {CURRENCY_CODE}")
}

/// Rounded percentage saved by a sale price, or 0 when there is no sale.
pub fn sale_percent(price: f64, sale_price: Option<f64>) -> u32 {
    match sale_price {
        Some(sale) if price > 0.0 && sale.is_finite() && sale < price => {
            (((price - sale) / price) * 100.0).round() as u32
        }
        _ => 0,
    }
}

/// Serde adapter for a stored unit price.
///
/// Reads numbers and numeric strings; anything else becomes NaN so the line
/// survives a plain load and is dropped by validation. NaN is written back
/// as `null`.
pub(crate) mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if price.is_finite() {
            serializer.serialize_f64(*price)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_price(&value).unwrap_or(f64::NAN))
    }

    pub fn missing() -> f64 {
        f64::NAN
    }
}
