//! # CRM App Library
//!
//! The barbershop and cash-desk screens of the CRM, built on [`list_framework`].
//!
//! ## Core Components
//!
//! - **[model]**: Records as the REST API serves them ([`Client`](model::Client),
//!   [`Appointment`](model::Appointment), [`Service`](model::Service), ...), decoded leniently.
//! - **[clients]**: One typed client per remote collection, each a thin wrapper around a
//!   [`PageFetcher`](list_framework::PageFetcher).
//! - **[views]**: [`ListRecord`](list_framework::ListRecord) impls that turn the records into
//!   searchable, filterable, sortable rows.
//! - **[payroll]**: Daily payouts per master, with CSV export.
//! - **[barcode]**: EAN-13 check digits.
//! - **[preview]**: Image preview handles that release locally created blobs exactly once.
//! - **[lifecycle]**: [`CrmSystem`](lifecycle::CrmSystem) wiring plus tracing setup.
//!
//! ## Testing
//!
//! Every client accepts any [`PageSource`](list_framework::PageSource), so tests hand in a
//! [`MockPageSource`](list_framework::mock::MockPageSource) or point the HTTP transport at a
//! `wiremock` server.

pub mod barcode;
pub mod clients;
pub mod config;
pub mod error;
pub mod lenient;
pub mod lifecycle;
pub mod model;
pub mod money;
pub mod payroll;
pub mod preview;
pub mod views;

pub use config::{Config, ConfigError};
pub use error::AppError;
