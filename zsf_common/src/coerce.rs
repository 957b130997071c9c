//! Lenient numeric coercion with explicit fallbacks.
//!
//! Cart lines and order payloads travel through unschema'd storage slots and historical JSON
//! shapes, so prices and quantities arrive as numbers, numeric strings, or garbage. These helpers
//! are the single coercion implementation shared by the client and the server, so the two sides
//! can never drift in how they read the same payload.
use serde_json::Value;

use crate::Price;

/// Interprets a JSON value as a finite number. Numeric strings are trimmed and must parse in
/// full; a partially numeric string is treated as malformed.
fn as_finite_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Coerces a stored price to a [`Price`], or `None` when the value is absent or malformed.
/// The caller decides the fallback (catalog lookup on the client, zero on the server).
pub fn coerce_price(value: &Value) -> Option<Price> {
    as_finite_f64(value).map(Price::from)
}

/// Coerces a stored quantity to a whole number of units, or `None` when absent or malformed.
/// A missing quantity means "one unit", never zero; the caller supplies that fallback.
pub fn coerce_quantity(value: &Value) -> Option<i64> {
    #[allow(clippy::cast_possible_truncation)]
    as_finite_f64(value).map(|v| v.trunc() as i64)
}

/// `coerce_price` with the server-side fallback of zero baked in.
pub fn price_or_zero(value: &Value) -> Price {
    coerce_price(value).unwrap_or(Price::ZERO)
}

/// `coerce_quantity` with the "one unit" fallback baked in.
pub fn quantity_or_one(value: &Value) -> i64 {
    coerce_quantity(value).unwrap_or(1)
}
