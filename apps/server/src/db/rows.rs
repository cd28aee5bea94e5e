//! Helpers for decoding procedure rows into typed structs.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

use super::{ResultSet, Row};

/// Decode one row into `T`.
pub fn decode<T: DeserializeOwned>(row: Row) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(row))
}

/// Decode every row into `T`.
pub fn decode_all<T: DeserializeOwned>(rows: ResultSet) -> Result<Vec<T>, serde_json::Error> {
    rows.into_iter().map(decode).collect()
}

/// Decode the first row, if any.
pub fn decode_first<T: DeserializeOwned>(rows: ResultSet) -> Result<Option<T>, serde_json::Error> {
    rows.into_iter().next().map(decode).transpose()
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        // DECIMAL aggregates arrive as strings
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64)),
        _ => None,
    }
}

/// Accept integers, floats and numeric strings; null becomes 0.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0);
    }
    value_to_i64(&value).ok_or_else(|| D::Error::custom(format!("expected integer, got {}", value)))
}

/// Read an integer column by name.
pub fn int_column(row: &Row, column: &str) -> Option<i64> {
    row.get(column).and_then(value_to_i64)
}
