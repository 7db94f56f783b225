use crate::lenient;
use crate::model::{RecordId, ServiceIndex};
use crate::money::DASH;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Statuses that mean the visit took place and is billable.
const COMPLETED: [&str; 7] = [
    "completed",
    "done",
    "finished",
    "завершено",
    "завершен",
    "закрыт",
    "оплачен",
];

/// A line of an appointment's `services` array: either a bare service id or an inline
/// object with its own name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServiceRef {
    Id(RecordId),
    Line(ServiceLine),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceLine {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_name: String,
}

/// A booked visit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    #[serde(default)]
    pub client: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub client_name: String,
    /// The master who served the visit, from `barber`, `employee` or `master`.
    #[serde(flatten)]
    pub master: MasterRef,
    #[serde(default)]
    pub service: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub service_name: String,
    #[serde(default)]
    pub services: Vec<ServiceRef>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::datetime")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::datetime")]
    pub end_at: Option<DateTime<Utc>>,
    /// What the visit was worth; the only amount payroll counts.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
}

/// The keys a visit may name its master under.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MasterRef {
    #[serde(default)]
    barber: Option<Value>,
    #[serde(default)]
    employee: Option<Value>,
    #[serde(default)]
    master: Option<Value>,
}

impl MasterRef {
    /// The first key that names someone.
    pub fn id(&self) -> Option<RecordId> {
        lenient::first_truthy([&self.barber, &self.employee, &self.master]).and_then(RecordId::from_value)
    }
}

impl Appointment {
    /// The master who served the visit.
    pub fn barber(&self) -> Option<RecordId> {
        self.master.id()
    }

    pub fn is_completed(&self) -> bool {
        let status = self.status.trim().to_lowercase();
        COMPLETED.contains(&status.as_str())
    }

    /// Calendar day of `start_at` at the given UTC offset.
    pub fn day(&self, offset: FixedOffset) -> Option<NaiveDate> {
        self.start_at.map(|t| t.with_timezone(&offset).date_naive())
    }

    /// Comma-separated service names, resolving bare ids through the catalogue.
    pub fn service_names(&self, catalogue: &ServiceIndex) -> String {
        let names: Vec<String> = self
            .services
            .iter()
            .filter_map(|line| match line {
                ServiceRef::Line(l) if !l.name.is_empty() => Some(l.name.clone()),
                ServiceRef::Line(l) if !l.service_name.is_empty() => Some(l.service_name.clone()),
                ServiceRef::Line(l) => l.id.as_ref().and_then(|id| catalogue.get(id)).map(|s| s.name.clone()),
                ServiceRef::Id(id) => catalogue.get(id).map(|s| s.name.clone()),
            })
            .filter(|n| !n.is_empty())
            .collect();
        if !names.is_empty() {
            return names.join(", ");
        }
        if !self.service_name.is_empty() {
            return self.service_name.clone();
        }
        self.service
            .as_ref()
            .and_then(|id| catalogue.get(id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| DASH.to_string())
    }

    /// `client_name`, else the client id, else a dash.
    pub fn client_label(&self) -> String {
        if !self.client_name.trim().is_empty() {
            self.client_name.trim().to_string()
        } else if let Some(id) = &self.client {
            id.to_string()
        } else {
            DASH.to_string()
        }
    }

    /// `"HH:MM–HH:MM"` in local time, a dash for a missing end.
    pub fn time_range(&self, offset: FixedOffset) -> String {
        let hm = |t: Option<DateTime<Utc>>| {
            t.map(|t| t.with_timezone(&offset).format("%H:%M").to_string())
                .unwrap_or_else(|| DASH.to_string())
        };
        format!("{}–{}", hm(self.start_at), hm(self.end_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Service;
    use serde_json::json;

    fn catalogue() -> ServiceIndex {
        let services: Vec<Service> = serde_json::from_value(json!([
            { "id": 1, "name": "Стрижка", "price": 500 },
            { "id": 2, "name": "Борода", "price": "300" }
        ]))
        .unwrap();
        ServiceIndex::new(&services)
    }

    fn appt(value: serde_json::Value) -> Appointment {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn completed_statuses() {
        assert!(appt(json!({ "id": 1, "status": " Completed " })).is_completed());
        assert!(appt(json!({ "id": 1, "status": "оплачен" })).is_completed());
        assert!(!appt(json!({ "id": 1, "status": "booked" })).is_completed());
        assert!(!appt(json!({ "id": 1 })).is_completed());
    }

    #[test]
    fn price_is_lenient_and_other_amounts_are_ignored() {
        assert_eq!(appt(json!({ "id": 1, "price": "1 200 сом" })).price, 1200.0);
        assert_eq!(appt(json!({ "id": 1, "total_amount": 900, "paid_amount": 900 })).price, 0.0);
        assert_eq!(appt(json!({ "id": 1, "price": null })).price, 0.0);
    }

    #[test]
    fn service_names_resolve_ids_and_lines() {
        let c = catalogue();
        assert_eq!(appt(json!({ "id": 1, "services": [1, 2] })).service_names(&c), "Стрижка, Борода");
        assert_eq!(
            appt(json!({ "id": 1, "services": [{ "service_name": "Укладка" }, 1] })).service_names(&c),
            "Укладка, Стрижка"
        );
        assert_eq!(appt(json!({ "id": 1, "service": 2 })).service_names(&c), "Борода");
        assert_eq!(appt(json!({ "id": 1 })).service_names(&c), "—");
    }

    #[test]
    fn master_named_under_several_keys() {
        assert_eq!(
            appt(json!({ "id": 1, "barber": 3, "employee": 4, "master": null })).barber(),
            Some(RecordId::from(3u64))
        );
        assert_eq!(
            appt(json!({ "id": 1, "barber": "", "employee": 4 })).barber(),
            Some(RecordId::from(4u64))
        );
        assert_eq!(appt(json!({ "id": 1, "barber": null })).barber(), None);
    }

    #[test]
    fn master_aliases_and_local_day() {
        let a = appt(json!({
            "id": 1,
            "master": 7,
            "start_at": "2024-05-02T20:30:00Z",
            "end_at": "2024-05-02T21:15:00Z"
        }));
        assert_eq!(a.barber(), Some(RecordId::from(7u64)));

        let bishkek = FixedOffset::east_opt(6 * 3600).unwrap();
        assert_eq!(a.day(bishkek), NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(a.time_range(bishkek), "02:30–03:15");
        assert_eq!(a.client_label(), "—");
    }
}
