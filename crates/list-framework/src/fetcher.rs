//! # Page-Cursor Fetcher
//!
//! This module defines [`PageFetcher`], which reads an entire remote collection by
//! following the server's `next` pointers one page at a time.
//!
//! ## Guarantees
//!
//! * Pages are requested strictly in sequence; page *n+1* is only requested after page
//!   *n* has resolved.
//! * No page is requested twice within one call. Cursors are compared in the source's
//!   canonical form ([`PageSource::canonical`]), so a server that hands back a link to a
//!   page it already served ends the walk instead of looping forever, however that
//!   link is spelled.
//! * A failed request ends the walk too. The items gathered up to that point are still
//!   returned; the failure is logged and recorded in [`StopReason::Failed`].
//! * Nothing is cached: every call starts again from the first page.

use crate::{Cursor, FetchError, PageSource};
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Why a walk over the pages ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no `next` pointer.
    Exhausted,
    /// The server pointed back at a page that was already fetched.
    RepeatedCursor(Cursor),
    /// The configured page cap was reached with more pages still advertised.
    PageLimit(usize),
    /// A request failed; later pages were not fetched.
    Failed(FetchError),
}

/// The result of walking a paginated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Collected<T> {
    pub items: Vec<T>,
    /// Number of pages that were successfully fetched.
    pub pages: usize,
    pub stop: StopReason,
}

impl<T> Collected<T> {
    /// `true` when the walk ended because the collection ran out, not because it was
    /// cut short.
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::Exhausted)
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Reads every page of a collection from a [`PageSource`].
///
/// # Example
///
/// ```rust
/// use list_framework::mock::MockPageSource;
/// use list_framework::{PageFetcher, StopReason};
///
/// #[tokio::main]
/// async fn main() {
///     let mut mock = MockPageSource::<u32>::new();
///     mock.expect_page("/numbers/").return_page(vec![1, 2], Some("/numbers/?page=2"));
///     mock.expect_page("/numbers/?page=2").return_page(vec![3], None);
///
///     let fetcher = PageFetcher::new(mock.source());
///     let collected = fetcher.collect("/numbers/").await;
///
///     assert_eq!(collected.items, vec![1, 2, 3]);
///     assert_eq!(collected.stop, StopReason::Exhausted);
///     mock.verify();
/// }
/// ```
pub struct PageFetcher<T, S> {
    source: S,
    max_pages: Option<usize>,
    _record: PhantomData<fn() -> T>,
}

impl<T, S: Clone> Clone for PageFetcher<T, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            max_pages: self.max_pages,
            _record: PhantomData,
        }
    }
}

impl<T, S> PageFetcher<T, S>
where
    T: Send,
    S: PageSource<T>,
{
    /// A fetcher bounded only by the repeated-cursor guard.
    pub fn new(source: S) -> Self {
        Self {
            source,
            max_pages: None,
            _record: PhantomData,
        }
    }

    /// Stop after `max_pages` pages even if the server advertises more.
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages.filter(|m| *m > 0);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Walk the collection starting at `start` and report how the walk ended.
    pub async fn collect(&self, start: impl Into<Cursor>) -> Collected<T> {
        let start = start.into();
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        let mut items = Vec::new();
        let mut seen: HashSet<Cursor> = HashSet::new();
        let mut pages = 0usize;
        let mut next = Some(start.clone());

        let stop = loop {
            let Some(cursor) = next.take() else {
                break StopReason::Exhausted;
            };
            let key = self.source.canonical(&cursor);
            if seen.contains(&key) {
                warn!(record_type, %cursor, pages, "Cursor repeated; stopping");
                break StopReason::RepeatedCursor(cursor);
            }
            if let Some(limit) = self.max_pages {
                if pages >= limit {
                    warn!(record_type, %cursor, limit, "Page limit reached; stopping");
                    break StopReason::PageLimit(limit);
                }
            }
            seen.insert(key);

            match self.source.fetch_page(&cursor).await {
                Ok(page) => {
                    pages += 1;
                    debug!(record_type, %cursor, count = page.items.len(), "Page");
                    items.extend(page.items);
                    next = page.next;
                }
                Err(e) => {
                    warn!(record_type, %cursor, error = %e, "Page failed; keeping partial result");
                    break StopReason::Failed(e);
                }
            }
        };

        info!(record_type, %start, pages, items = items.len(), complete = matches!(stop, StopReason::Exhausted), "Collected");
        Collected { items, pages, stop }
    }

    /// Walk the collection and return just the items, partial or not.
    pub async fn fetch_all(&self, start: impl Into<Cursor>) -> Vec<T> {
        self.collect(start).await.into_items()
    }
}
