//! Typed clients, one per remote collection.
//!
//! Each client names its endpoint and wraps a [`Fetcher`]; reading the whole collection
//! comes from [`CollectionClient`]. Domain-specific reads (one day's appointments, the
//! employee directory, a month of pay rates) live on the concrete clients.

pub mod barbershop_client;
pub mod cashflow_client;
pub mod collection_client;
pub mod employee_client;
pub mod rate_client;

pub use barbershop_client::{AppointmentsClient, ClientsClient, ServicesClient};
pub use cashflow_client::CashFlowsClient;
pub use collection_client::{CollectionClient, Fetcher, SharedSource};
pub use employee_client::EmployeesClient;
pub use rate_client::RatesClient;
