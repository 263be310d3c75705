//! Lenient field decoders for records owned by external stores.
//!
//! Catalog and cart records come from stores this crate does not control.
//! A malformed text field must never fail a whole listing, so these
//! decoders substitute an empty value instead of erroring.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a text field; anything other than a JSON string becomes `""`.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Decode an optional text field; non-strings and empty strings become `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Decode a non-negative count; negative, fractional or non-numeric values
/// become `0`.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
