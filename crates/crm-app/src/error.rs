//! Top-level error type of the CRM app.
//!
//! Fetch failures inside a collection walk never surface here: the fetcher keeps what it
//! gathered and reports why it stopped. [`AppError`] covers what does abort a command:
//! bad configuration, a transport that cannot be built, bad user input and failed I/O.

use crate::barcode::BarcodeError;
use crate::config::ConfigError;
use list_framework::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Barcode: {0}")]
    Barcode(#[from] BarcodeError),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
