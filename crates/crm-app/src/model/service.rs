use crate::lenient;
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A service from the barbershop price list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawService")]
pub struct Service {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
    /// Duration as entered, e.g. `"30 мин"`.
    pub time: String,
    pub category: String,
    pub category_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawService {
    id: RecordId,
    #[serde(default)]
    service_name: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default, deserialize_with = "lenient::number")]
    price: f64,
    #[serde(default = "lenient::default_true", deserialize_with = "lenient::flag_default_true")]
    is_active: bool,
    #[serde(default, deserialize_with = "lenient::string")]
    time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    category: String,
    #[serde(default, deserialize_with = "lenient::string")]
    category_name: String,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default, rename = "createdAt")]
    created_at_camel: Option<Value>,
}

impl From<RawService> for Service {
    fn from(raw: RawService) -> Self {
        Self {
            name: lenient::first_truthy([&raw.service_name, &raw.name])
                .map(lenient::string_from_value)
                .unwrap_or_default(),
            created_at: lenient::first_truthy([&raw.created_at, &raw.created_at_camel])
                .and_then(lenient::datetime_from_value),
            id: raw.id,
            price: raw.price,
            is_active: raw.is_active,
            time: raw.time,
            category: raw.category,
            category_name: raw.category_name,
        }
    }
}

impl Service {
    /// The category as shown to users: its name when the API sends one, else the raw value.
    pub fn category_label(&self) -> &str {
        if self.category_name.is_empty() {
            &self.category
        } else {
            &self.category_name
        }
    }
}

/// Services by id, for resolving appointment lines.
#[derive(Debug, Clone, Default)]
pub struct ServiceIndex {
    by_id: HashMap<RecordId, Service>,
}

impl ServiceIndex {
    pub fn new(services: &[Service]) -> Self {
        Self {
            by_id: services.iter().map(|s| (s.id.clone(), s.clone())).collect(),
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&Service> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
