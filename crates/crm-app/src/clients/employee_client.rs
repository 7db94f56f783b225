//! # Employee Client
//!
//! Reads `/users/employees/` and turns it into the alphabetised directory the payroll
//! and appointment screens pick masters from.
use crate::clients::collection_client::{CollectionClient, Fetcher};
use crate::model::{Employee, EmployeeDirectory};
use list_framework::Cursor;
use tracing::{info, instrument};

/// Client for `/users/employees/`.
#[derive(Clone)]
pub struct EmployeesClient {
    inner: Fetcher<Employee>,
}

impl EmployeesClient {
    pub const ENDPOINT: &'static str = "/users/employees/";

    pub fn new(inner: Fetcher<Employee>) -> Self {
        Self { inner }
    }

    /// Display names of every employee, sorted.
    #[instrument(skip(self))]
    pub async fn directory(&self) -> EmployeeDirectory {
        let directory = EmployeeDirectory::new(&self.fetch_all().await);
        info!(employees = directory.len(), "Employee directory loaded");
        directory
    }
}

impl CollectionClient<Employee> for EmployeesClient {
    fn inner(&self) -> &Fetcher<Employee> {
        &self.inner
    }

    fn endpoint(&self) -> Cursor {
        Cursor::new(Self::ENDPOINT)
    }
}
