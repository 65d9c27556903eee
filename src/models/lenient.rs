//! Forgiving deserializers for backend payload fields.
//!
//! Note data coming back from the recommendation backend is inconsistently
//! populated: numbers show up as strings, counts as floats, objects as null.
//! Every helper here degrades to a zero/empty value instead of failing the
//! whole payload.

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Clamps NaN and negative values to zero
pub fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

/// Non-negative real score (similarity, family match)
pub fn score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().map(non_negative).unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().map(non_negative).unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Non-negative integer count (shared notes); fractional values are truncated
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    Ok(non_negative(raw).min(u32::MAX as f64) as u32)
}

/// String field that may arrive as a number (graph ids) or null
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Optional integer that may arrive as a string or float
pub fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Any structured value; null or a mistyped value becomes `T::default()`
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
