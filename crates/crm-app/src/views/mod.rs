//! List screens as [`ListRecord`](list_framework::ListRecord) impls.
//!
//! Each screen only says which fields are searched, which are filterable and what each
//! sort key reads; searching, filtering, sorting and paging are done by
//! [`list_framework`].

pub mod cashflows;
pub mod clients;
pub mod services;

pub use cashflows::{CashFlowField, CashTotals};
pub use clients::{build_client_rows, ClientField, ClientRow};
pub use services::ServiceField;

use list_framework::PageLink;

/// Render a pager window as text, the current page in brackets: `1 … 4 [5] 6 … 10`.
pub fn pager_line(links: &[PageLink], current: usize) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => format!("[{n}]"),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
