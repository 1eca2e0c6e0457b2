//! Shared utility functions for JSON extraction and text handling.
//!
//! ## JSON Extraction Helpers
//!
//! Ergonomic helpers for pulling values out of `serde_json::Value`:
//! - `json_string`, `json_string_or` - Extract strings
//! - `json_text_or` - Extract a string or a joined string array
//! - `json_rating` - Extract a 0-10 rating from loosely typed output

use serde::{Deserialize, Deserializer};

use crate::constants::rating::{MAX_RATING, MIN_RATING};

// =============================================================================
// JSON Value Extraction Helpers
// =============================================================================

/// Extract string from JSON value by key.
#[inline]
pub fn json_string(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(String::from)
}

/// Extract string with default value.
#[inline]
pub fn json_string_or(value: &serde_json::Value, key: &str, default: &str) -> String {
    json_string(value, key).unwrap_or_else(|| default.to_string())
}

/// Extract free text that the model may return either as a string or as a
/// list of strings. Lists are joined with newlines.
pub fn json_text_or(value: &serde_json::Value, key: &str, default: &str) -> String {
    match value.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => default.to_string(),
    }
}

/// Extract a rating by key. See [`rating_from_value`].
pub fn json_rating(value: &serde_json::Value, key: &str) -> Option<u8> {
    value.get(key).and_then(rating_from_value)
}

/// Interpret a JSON value as a rating on the 0-10 scale.
///
/// Integers are clamped, floats are rounded then clamped, and numeric
/// strings (`"7"`, `" 7.5 "`) are accepted. Anything else is `None`.
pub fn rating_from_value(value: &serde_json::Value) -> Option<u8> {
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !raw.is_finite() {
        return None;
    }

    Some(raw.round().clamp(MIN_RATING as f64, MAX_RATING as f64) as u8)
}

/// Serde adapter for rating fields that must be present.
pub fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    rating_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid rating: {}", value)))
}

// =============================================================================
// String Utilities
// =============================================================================

/// First `max_chars` characters of a string, on a char boundary.
pub fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
