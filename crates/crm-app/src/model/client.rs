use crate::lenient;
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Standing of a barbershop client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "Option<Value>")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Blacklist,
}

impl ClientStatus {
    pub const ALL: [ClientStatus; 3] = [ClientStatus::Active, ClientStatus::Inactive, ClientStatus::Blacklist];

    /// The value the API stores.
    pub fn api_token(self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Blacklist => "blacklist",
        }
    }

    /// The label shown in the UI and used as the filter value.
    pub fn label(self) -> &'static str {
        match self {
            ClientStatus::Active => "Активен",
            ClientStatus::Inactive => "Неактивен",
            ClientStatus::Blacklist => "В черном списке",
        }
    }

    /// Accepts either the API token or the UI label, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.api_token() == value || s.label().to_lowercase() == value)
    }
}

impl From<Option<Value>> for ClientStatus {
    /// Unknown, missing or non-text statuses count as active.
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::parse(&s).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// A barbershop client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawClient")]
pub struct Client {
    pub id: RecordId,
    pub full_name: String,
    pub phone: String,
    pub birth_date: String,
    pub status: ClientStatus,
    pub notes: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawClient {
    id: RecordId,
    #[serde(default, deserialize_with = "lenient::string")]
    full_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    phone: String,
    #[serde(default, deserialize_with = "lenient::string")]
    birth_date: String,
    #[serde(default)]
    status: ClientStatus,
    #[serde(default, deserialize_with = "lenient::string")]
    notes: String,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default, rename = "createdAt")]
    created_at_camel: Option<Value>,
}

impl From<RawClient> for Client {
    fn from(raw: RawClient) -> Self {
        Self {
            created_at: lenient::first_truthy([&raw.created_at, &raw.created_at_camel])
                .and_then(lenient::datetime_from_value),
            id: raw.id,
            full_name: raw.full_name,
            phone: raw.phone,
            birth_date: raw.birth_date,
            status: raw.status,
            notes: raw.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_with_missing_and_odd_fields() {
        let c: Client = serde_json::from_value(json!({
            "id": 5,
            "full_name": "Иванов Пётр",
            "phone": null,
            "status": "BLACKLIST",
            "createdAt": "2024-02-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(c.id, RecordId::from(5u64));
        assert_eq!(c.phone, "");
        assert_eq!(c.status, ClientStatus::Blacklist);
        assert!(c.created_at.is_some());
    }

    #[test]
    fn unknown_status_is_active() {
        let c: Client = serde_json::from_value(json!({ "id": 1, "status": "vip" })).unwrap();
        assert_eq!(c.status, ClientStatus::Active);
        let c: Client = serde_json::from_value(json!({ "id": 1, "status": null })).unwrap();
        assert_eq!(c.status, ClientStatus::Active);
        let c: Client = serde_json::from_value(json!({ "id": 1, "status": 2 })).unwrap();
        assert_eq!(c.status, ClientStatus::Active);
    }

    #[test]
    fn both_timestamp_spellings_at_once() {
        let c: Client = serde_json::from_value(json!({
            "id": 1,
            "created_at": "2024-03-01T08:00:00Z",
            "createdAt": "2020-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(c.created_at, lenient::parse_datetime("2024-03-01T08:00:00Z"));

        let c: Client =
            serde_json::from_value(json!({ "id": 1, "created_at": "", "createdAt": "2020-01-01" })).unwrap();
        assert_eq!(c.created_at, lenient::parse_datetime("2020-01-01"));
    }

    #[test]
    fn status_parses_tokens_and_labels() {
        assert_eq!(ClientStatus::parse("inactive"), Some(ClientStatus::Inactive));
        assert_eq!(ClientStatus::parse("В черном списке"), Some(ClientStatus::Blacklist));
        assert_eq!(ClientStatus::parse("активен"), Some(ClientStatus::Active));
        assert_eq!(ClientStatus::parse("all"), None);
    }
}
