//! Lenient decoding of API values.
//!
//! The backend is not consistent about types: money may arrive as `1500`, `"1500.00"` or
//! `"1 500 сом"`, flags may be missing, dates may be full timestamps or bare days. The
//! helpers here are used with `#[serde(deserialize_with = ...)]` so a single odd field
//! never fails a whole page.
//!
//! Some fields also travel under several names (`barber` / `employee` / `master`). Records
//! read each spelling into its own raw slot and pick one with [`first_set`] or
//! [`first_truthy`], so a payload carrying two spellings at once still decodes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a number that may carry separators or a currency suffix.
///
/// Everything except ASCII digits, `.` and `-` is dropped before parsing; anything that
/// still does not parse is `0`.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

pub fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_number(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

/// A value that a loose truthiness check treats as missing: `null`, `false`, zero or an
/// empty string.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// The first candidate that is present and not `null`.
pub fn first_set<'a, const N: usize>(candidates: [&'a Option<Value>; N]) -> Option<&'a Value> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_null())
}

/// The first candidate that is not blank in the sense of [`is_blank`].
pub fn first_truthy<'a, const N: usize>(candidates: [&'a Option<Value>; N]) -> Option<&'a Value> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| !is_blank(v))
}

/// Text of a value; `null` is empty and other scalars are rendered.
pub fn string_from_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn datetime_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s),
        _ => None,
    }
}

/// Parse an ISO-8601 timestamp, a naive `YYYY-MM-DD HH:MM[:SS]` (taken as UTC) or a bare
/// day (midnight UTC).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A number; `null`, missing or garbage is `0`.
pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

/// A string; `null` is empty and numbers are rendered.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(other) => string_from_value(&other),
        None => String::new(),
    })
}

/// A timestamp; anything unparsable is `None`.
pub fn datetime<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(datetime_from_value))
}

/// A flag that counts as `true` unless the server says otherwise.
pub fn flag_default_true<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !matches!(s.trim().to_lowercase().as_str(), "" | "false" | "0"),
        Some(_) => true,
    })
}

pub(crate) fn default_true() -> bool {
    true
}
