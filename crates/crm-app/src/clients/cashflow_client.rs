//! # Cash-Flow Client
use crate::clients::collection_client::{CollectionClient, Fetcher};
use crate::model::CashFlow;
use list_framework::Cursor;

/// Client for `/construction/cashflows/`, requested in pages of 200.
#[derive(Clone)]
pub struct CashFlowsClient {
    inner: Fetcher<CashFlow>,
}

impl CashFlowsClient {
    pub const ENDPOINT: &'static str = "/construction/cashflows/?page_size=200";

    pub fn new(inner: Fetcher<CashFlow>) -> Self {
        Self { inner }
    }
}

impl CollectionClient<CashFlow> for CashFlowsClient {
    fn inner(&self) -> &Fetcher<CashFlow> {
        &self.inner
    }

    fn endpoint(&self) -> Cursor {
        Cursor::new(Self::ENDPOINT)
    }
}
