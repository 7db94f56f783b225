//! Records as the REST API serves them.
//!
//! Field names follow the API's snake_case JSON. Every optional or loosely typed field is
//! decoded through [`crate::lenient`], so a record is only rejected when its `id` is
//! missing.

pub mod appointment;
pub mod cashflow;
pub mod client;
pub mod employee;
pub mod rate;
pub mod service;

pub use appointment::{Appointment, ServiceLine, ServiceRef};
pub use cashflow::{CashFlow, Direction};
pub use client::{Client, ClientStatus};
pub use employee::{Employee, EmployeeDirectory};
pub use rate::{PayRate, Rate, RateBook, RateMode};
pub use service::{Service, ServiceIndex};

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Server-side identifier. The API uses integers for some collections and UUIDs for
/// others; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An id from an already decoded JSON value; `None` for anything that is not a
    /// number or a non-empty string.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Self(i.to_string()),
                None => Self(n.to_string()),
            }),
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            _ => None,
        }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self(n.to_string()),
            RawId::Float(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_from_numbers_and_strings_compare_equal() {
        let a: RecordId = serde_json::from_str("17").unwrap();
        let b: RecordId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, RecordId::from(17u64));

        let uuid: RecordId = serde_json::from_str("\"9b2f-aa\"").unwrap();
        assert_eq!(uuid.to_string(), "9b2f-aa");
    }

    #[test]
    fn ids_from_loose_values() {
        assert_eq!(RecordId::from_value(&serde_json::json!(17)), Some(RecordId::from(17u64)));
        assert_eq!(RecordId::from_value(&serde_json::json!(" 17 ")), Some(RecordId::from(17u64)));
        assert_eq!(RecordId::from_value(&serde_json::json!("")), None);
        assert_eq!(RecordId::from_value(&serde_json::json!({ "id": 1 })), None);
    }
}
