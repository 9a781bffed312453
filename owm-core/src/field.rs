//! Lenient field readers over a parsed JSON object.
//!
//! Every reader yields `None` when the field is missing, `null`, or of the
//! wrong type. None of them fail: a malformed field is just an absent one.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

/// Seconds in the payload, milliseconds in the resulting instant.
const MILLIS_PER_SECOND: i64 = 1000;

/// Any JSON number, narrowed to `f32`.
pub fn float(obj: &Object, key: &str) -> Option<f32> {
    double(obj, key).map(|v| v as f32)
}

/// Any JSON number.
pub fn double(obj: &Object, key: &str) -> Option<f64> {
    obj.get(key)?.as_f64()
}

/// A JSON integer that fits in `i32`.
pub fn int(obj: &Object, key: &str) -> Option<i32> {
    long(obj, key).and_then(|v| i32::try_from(v).ok())
}

/// A JSON integer that fits in `i64`.
pub fn long(obj: &Object, key: &str) -> Option<i64> {
    obj.get(key)?.as_i64()
}

/// A non-empty JSON string.
pub fn string(obj: &Object, key: &str) -> Option<String> {
    obj.get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

pub fn object<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
    obj.get(key)?.as_object()
}

pub fn array<'a>(obj: &'a Object, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key)?.as_array()
}

/// Integer seconds since the epoch, as an instant.
pub fn timestamp(obj: &Object, key: &str) -> Option<DateTime<Utc>> {
    let millis = long(obj, key)?.checked_mul(MILLIS_PER_SECOND)?;
    DateTime::from_timestamp_millis(millis)
}

/// The `cod` status field. Current weather sends it as a number, forecasts
/// as a decimal string, so both are accepted.
pub fn response_code(obj: &Object, key: &str) -> Option<i32> {
    match obj.get(key)? {
        Value::String(s) => s.trim().parse().ok(),
        _ => int(obj, key),
    }
}

/// Builds one item per object element of the array at `key`, in order.
/// Non-object elements are skipped.
pub fn list<T>(obj: &Object, key: &str, build: impl Fn(&Object) -> T) -> Vec<T> {
    array(obj, key)
        .map(|items| items.iter().filter_map(Value::as_object).map(build).collect())
        .unwrap_or_default()
}
