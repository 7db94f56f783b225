//! # Services Screen
//!
//! The price list, filterable by active flag and category.
use crate::model::{RecordId, Service};
use chrono::{DateTime, Utc};
use list_framework::{FilterValue, ListRecord};
use std::borrow::Cow;

/// Filterable fields of [`Service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceField {
    /// `"active"` or `"inactive"`.
    Status,
    /// The raw category value.
    Category,
}

impl ServiceField {
    /// The status filter for user input: `active` or `inactive` in any case, or the
    /// `all` sentinel. `None` for anything else.
    pub fn status_filter(raw: &str) -> Option<FilterValue> {
        match FilterValue::parse(raw) {
            FilterValue::All => Some(FilterValue::All),
            FilterValue::Exact(token) => match token.to_lowercase().as_str() {
                "active" => Some(FilterValue::Exact("active".to_string())),
                "inactive" => Some(FilterValue::Exact("inactive".to_string())),
                _ => None,
            },
        }
    }
}

impl ListRecord for Service {
    type Id = RecordId;
    type Field = ServiceField;

    fn id(&self) -> RecordId {
        self.id.clone()
    }

    /// Name, price, duration and category label.
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(&self.name),
            Cow::Owned(self.price.to_string()),
            Cow::Borrowed(&self.time),
            Cow::Borrowed(self.category_label()),
        ]
    }

    fn category(&self, field: ServiceField) -> Option<Cow<'_, str>> {
        match field {
            ServiceField::Status => Some(Cow::Borrowed(if self.is_active { "active" } else { "inactive" })),
            ServiceField::Category => Some(Cow::Borrowed(&self.category)),
        }
    }

    fn sort_name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.name))
    }

    fn sort_price(&self) -> Option<f64> {
        Some(self.price)
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_framework::{derive_view, SortKey, ViewState};
    use serde_json::json;

    fn services() -> Vec<Service> {
        serde_json::from_value(json!([
            { "id": 1, "name": "Стрижка мужская", "price": 600, "time": "40 мин", "category": "hair" },
            { "id": 2, "name": "Бритьё", "price": "350", "time": "30 мин", "category": "beard", "is_active": false },
            { "id": 3, "name": "Камуфляж бороды", "price": 800, "time": "45 мин", "category": "beard",
              "category_name": "Борода" }
        ]))
        .unwrap()
    }

    fn ids(items: &[Service], state: &ViewState<ServiceField>) -> Vec<String> {
        derive_view(items, state).iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn search_covers_price_duration_and_category() {
        let items = services();
        assert_eq!(ids(&items, &ViewState::new().with_search("350")), vec!["2"]);
        assert_eq!(ids(&items, &ViewState::new().with_search("45 мин")), vec!["3"]);
        assert_eq!(ids(&items, &ViewState::new().with_search("борода")), vec!["3"]);
    }

    #[test]
    fn status_and_category_filters_combine() {
        let items = services();
        let state = ViewState::new()
            .with_filter(ServiceField::Category, "beard")
            .with_filter(ServiceField::Status, "active")
            .with_sort(SortKey::PriceAsc);
        assert_eq!(ids(&items, &state), vec!["3"]);

        let state = ViewState::new()
            .with_filter(ServiceField::Category, "beard")
            .with_sort(SortKey::PriceAsc);
        assert_eq!(ids(&items, &state), vec!["2", "3"]);
    }

    #[test]
    fn status_filter_ignores_case() {
        let items = services();
        let filter = ServiceField::status_filter("Inactive").unwrap();
        assert_eq!(filter, FilterValue::Exact("inactive".to_string()));
        let state = ViewState::new().with_filter(ServiceField::Status, filter);
        assert_eq!(ids(&items, &state), vec!["2"]);

        assert_eq!(ServiceField::status_filter(" ACTIVE "), Some(FilterValue::Exact("active".into())));
        assert_eq!(ServiceField::status_filter("ALL"), Some(FilterValue::All));
        assert_eq!(ServiceField::status_filter("archived"), None);
    }
}
