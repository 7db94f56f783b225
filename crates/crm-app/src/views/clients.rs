//! # Clients Screen
//!
//! Barbershop clients joined with their appointment history: how many visits each has
//! and when the last one was. Searchable by name and phone, filterable by status.
use crate::model::{Appointment, Client, RecordId};
use chrono::{DateTime, Utc};
use list_framework::ListRecord;
use std::borrow::Cow;
use std::collections::HashMap;

/// Filterable fields of [`ClientRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientField {
    /// Matched against the UI label (`Активен`, `Неактивен`, `В черном списке`).
    Status,
}

/// One line of the clients table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRow {
    pub client: Client,
    pub visits: usize,
    pub last_visit: Option<DateTime<Utc>>,
}

/// Join `clients` with the appointments that reference them.
pub fn build_client_rows(clients: Vec<Client>, appointments: &[Appointment]) -> Vec<ClientRow> {
    let mut history: HashMap<&RecordId, (usize, Option<DateTime<Utc>>)> = HashMap::new();
    for appt in appointments {
        let Some(client) = &appt.client else {
            continue;
        };
        let entry = history.entry(client).or_default();
        entry.0 += 1;
        entry.1 = entry.1.max(appt.start_at);
    }

    clients
        .into_iter()
        .map(|client| {
            let (visits, last_visit) = history.get(&client.id).copied().unwrap_or_default();
            ClientRow {
                client,
                visits,
                last_visit,
            }
        })
        .collect()
}

impl ListRecord for ClientRow {
    type Id = RecordId;
    type Field = ClientField;

    fn id(&self) -> RecordId {
        self.client.id.clone()
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(&self.client.full_name), Cow::Borrowed(&self.client.phone)]
    }

    fn category(&self, field: ClientField) -> Option<Cow<'_, str>> {
        match field {
            ClientField::Status => Some(Cow::Borrowed(self.client.status.label())),
        }
    }

    fn sort_name(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(&self.client.full_name))
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.client.created_at
    }

    fn sort_value(&self) -> Option<f64> {
        Some(self.visits as f64)
    }

    fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_visit
    }
}
