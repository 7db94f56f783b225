//! # Rate Client
//!
//! Pay rates are stored per month and per mode. A month's [`RateBook`] is assembled from
//! two reads: the per-record rates and the percentage rates. Older backends serve the
//! percentages under `mode=month`, which is tried when `mode=percent` yields nothing.
use crate::clients::collection_client::{CollectionClient, Fetcher};
use crate::model::{Rate, RateBook, RateMode};
use list_framework::Cursor;
use tracing::{info, instrument, warn};

/// Client for `/education/teacher-rates/`.
#[derive(Clone)]
pub struct RatesClient {
    inner: Fetcher<Rate>,
}

impl RatesClient {
    pub const ENDPOINT: &'static str = "/education/teacher-rates/";

    pub fn new(inner: Fetcher<Rate>) -> Self {
        Self { inner }
    }

    /// First page of the rates of `mode` for `period` (`YYYY-MM`).
    pub fn endpoint_for(period: &str, mode: &str) -> Cursor {
        Cursor::new(format!("{}?period={period}&mode={mode}&page_size=1000", Self::ENDPOINT))
    }

    /// Pay terms of every master for `period`.
    #[instrument(skip(self))]
    pub async fn rate_book(&self, period: &str) -> RateBook {
        let per_record = self
            .inner
            .collect(Self::endpoint_for(period, RateMode::PerRecord.token()))
            .await;

        let mut percent = self
            .inner
            .collect(Self::endpoint_for(period, RateMode::Percent.token()))
            .await;
        if percent.pages == 0 {
            warn!(period, "Percent rates unavailable; trying monthly rates");
            percent = self.inner.collect(Self::endpoint_for(period, "month")).await;
        }

        let mut book = RateBook::new();
        book.absorb(RateMode::PerRecord, &per_record.items);
        book.absorb(RateMode::Percent, &percent.items);
        info!(period, masters = book.len(), "Rates loaded");
        book
    }
}

impl CollectionClient<Rate> for RatesClient {
    fn inner(&self) -> &Fetcher<Rate> {
        &self.inner
    }

    fn endpoint(&self) -> Cursor {
        Cursor::new(Self::ENDPOINT)
    }
}
