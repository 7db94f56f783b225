//! # List Framework
//!
//! This crate provides the building blocks every list screen of the CRM is made of:
//! read a paginated remote collection in full, then show a searched, filtered, sorted
//! and locally paged view of it.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Fetch Layer** ([`PageSource`], [`PageFetcher`]) - follows `next` cursors until the
//!    collection is exhausted, a cursor repeats, or a request fails.
//! 2. **Derive Layer** ([`ListRecord`], [`derive_view`]) - a pure function from records
//!    plus [`ViewState`] to an ordered subset.
//! 3. **Page Layer** ([`LocalPager`], [`ListView`]) - slices the derived subset into
//!    fixed-size pages and snaps back to page 1 whenever the subset changes.
//!
//! ```text
//! PageSource ──pages──▶ PageFetcher ──Vec<T>──▶ derive_view ──DerivedView──▶ LocalPager ──▶ visible slice
//! ```
//!
//! ## Core Abstractions
//!
//! ### [`ListRecord`] - The Field Accessors
//!
//! A record type says which of its fields are searched, which are categorical, and which
//! ones feed each [`SortKey`]. That is all a screen has to provide.
//!
//! ### [`PageSource`] - The Seam to the Server
//!
//! One request per call. [`HttpPageSource`] talks to the REST API through `reqwest`;
//! [`mock::MockPageSource`] replays scripted pages in tests.
//!
//! ## Quick Example
//!
//! ```rust
//! use list_framework::mock::MockPageSource;
//! use list_framework::{ListRecord, ListView, NoFields, PageFetcher, SortKey};
//! use std::borrow::Cow;
//!
//! #[derive(Clone, Debug)]
//! struct Client { id: u32, full_name: String }
//!
//! impl ListRecord for Client {
//!     type Id = u32;
//!     type Field = NoFields;
//!     fn id(&self) -> u32 { self.id }
//!     fn search_fields(&self) -> Vec<Cow<'_, str>> { vec![Cow::Borrowed(&self.full_name)] }
//!     fn category(&self, field: NoFields) -> Option<Cow<'_, str>> { match field {} }
//!     fn sort_name(&self) -> Option<Cow<'_, str>> { Some(Cow::Borrowed(&self.full_name)) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let clients: Vec<Client> = ["Петров Иван", "Иванов Пётр", "Алиева Айгуль"]
//!         .iter()
//!         .enumerate()
//!         .map(|(i, n)| Client { id: i as u32 + 1, full_name: n.to_string() })
//!         .collect();
//!
//!     let mut mock = MockPageSource::new();
//!     mock.script_collection("/barbershop/clients/", clients, 2);
//!
//!     let fetcher = PageFetcher::new(mock.source());
//!     let mut view = ListView::new(12);
//!     view.replace_records(fetcher.fetch_all("/barbershop/clients/").await);
//!     view.set_sort(SortKey::NameAsc);
//!
//!     let names: Vec<&str> = view.visible().iter().map(|c| c.full_name.as_str()).collect();
//!     assert_eq!(names, vec!["Алиева Айгуль", "Иванов Пётр", "Петров Иван"]);
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Pages of one collection are fetched strictly one after another
//! - Independent collections may be fetched concurrently (`tokio::join!`); they share no
//!   mutable state
//! - Dropping a fetch future abandons the in-flight request
//! - Deriving and paging are synchronous and cheap enough to rerun on every keystroke
//!
//! ## Testing
//!
//! See the [`mock`] module for the scripted page source and its usage patterns.

pub mod collate;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod list_view;
pub mod mock;
pub mod page;
pub mod pager;
pub mod record;
pub mod source;
pub mod view;

// Re-export core types for convenience
pub use error::FetchError;
pub use fetcher::{Collected, PageFetcher, StopReason};
pub use http::{HttpPageSource, HttpTransport};
pub use list_view::ListView;
pub use page::{Cursor, Page, PageBody};
pub use pager::{LocalPager, PageLink, DEFAULT_PAGE_SIZE};
pub use record::{ListRecord, NoFields};
pub use source::PageSource;
pub use view::{derive_view, DerivedView, FilterValue, SortKey, ViewState};
