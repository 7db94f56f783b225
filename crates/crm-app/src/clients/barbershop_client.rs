//! # Barbershop Clients
//!
//! Clients for the three barbershop collections: clients, appointments and services.
use crate::clients::collection_client::{CollectionClient, Fetcher};
use crate::model::{Appointment, Client, Service, ServiceIndex};
use chrono::{FixedOffset, NaiveDate};
use list_framework::Cursor;
use tracing::{debug, instrument};

/// Client for `/barbershop/clients/`.
#[derive(Clone)]
pub struct ClientsClient {
    inner: Fetcher<Client>,
}

impl ClientsClient {
    pub const ENDPOINT: &'static str = "/barbershop/clients/";

    pub fn new(inner: Fetcher<Client>) -> Self {
        Self { inner }
    }
}

impl CollectionClient<Client> for ClientsClient {
    fn inner(&self) -> &Fetcher<Client> {
        &self.inner
    }

    fn endpoint(&self) -> Cursor {
        Cursor::new(Self::ENDPOINT)
    }
}

/// Client for `/barbershop/appointments/`.
#[derive(Clone)]
pub struct AppointmentsClient {
    inner: Fetcher<Appointment>,
}

impl AppointmentsClient {
    pub const ENDPOINT: &'static str = "/barbershop/appointments/";

    pub fn new(inner: Fetcher<Appointment>) -> Self {
        Self { inner }
    }

    /// Appointments starting on `day` in the given time zone.
    #[instrument(skip(self))]
    pub async fn on_day(&self, day: NaiveDate, offset: FixedOffset) -> Vec<Appointment> {
        let all = self.fetch_all().await;
        let total = all.len();
        let day_items: Vec<Appointment> = all.into_iter().filter(|a| a.day(offset) == Some(day)).collect();
        debug!(total, on_day = day_items.len(), "Appointments filtered by day");
        day_items
    }
}

impl CollectionClient<Appointment> for AppointmentsClient {
    fn inner(&self) -> &Fetcher<Appointment> {
        &self.inner
    }

    fn endpoint(&self) -> Cursor {
        Cursor::new(Self::ENDPOINT)
    }
}

/// Client for `/barbershop/services/`.
#[derive(Clone)]
pub struct ServicesClient {
    inner: Fetcher<Service>,
}

impl ServicesClient {
    pub const ENDPOINT: &'static str = "/barbershop/services/";

    pub fn new(inner: Fetcher<Service>) -> Self {
        Self { inner }
    }

    /// The price list keyed by service id.
    pub async fn index(&self) -> ServiceIndex {
        ServiceIndex::new(&self.fetch_all().await)
    }
}

impl CollectionClient<Service> for ServicesClient {
    fn inner(&self) -> &Fetcher<Service> {
        &self.inner
    }

    fn endpoint(&self) -> Cursor {
        Cursor::new(Self::ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::SharedSource;
    use list_framework::mock::MockPageSource;
    use list_framework::{FetchError, PageFetcher, StopReason};
    use serde_json::json;
    use std::sync::Arc;

    fn appointment(id: u64, start: &str) -> Appointment {
        serde_json::from_value(json!({ "id": id, "start_at": start })).unwrap()
    }

    #[tokio::test]
    async fn test_on_day_uses_local_calendar_day() {
        let mut mock = MockPageSource::new();
        mock.expect_page(AppointmentsClient::ENDPOINT).return_page(
            vec![
                appointment(1, "2024-05-02T17:00:00Z"),
                appointment(2, "2024-05-02T19:00:00Z"),
                appointment(3, "2024-05-03T05:00:00Z"),
            ],
            None,
        );
        let source: SharedSource<Appointment> = Arc::new(mock.source());
        let client = AppointmentsClient::new(PageFetcher::new(source));

        let bishkek = FixedOffset::east_opt(6 * 3600).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let ids: Vec<String> = client
            .on_day(day, bishkek)
            .await
            .iter()
            .map(|a| a.id.to_string())
            .collect();

        assert_eq!(ids, vec!["2", "3"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_collect_reports_failure_with_partial_items() {
        let mut mock = MockPageSource::<Client>::new();
        let first: Vec<Client> = serde_json::from_value(json!([{ "id": 1 }, { "id": 2 }])).unwrap();
        mock.expect_page(ClientsClient::ENDPOINT)
            .return_page(first, Some("/barbershop/clients/?page=2"));
        mock.expect_page("/barbershop/clients/?page=2")
            .return_err(FetchError::Transport("connection reset".into()));

        let client = ClientsClient::new(PageFetcher::new(Arc::new(mock.source()) as SharedSource<Client>));
        let collected = client.collect().await;

        assert_eq!(collected.items.len(), 2);
        assert!(matches!(collected.stop, StopReason::Failed(FetchError::Transport(_))));
        mock.verify();
    }
}
