//! # Mock Page Source & Testing Guide
//!
//! `MockPageSource<T>` implements [`PageSource<T>`] entirely in memory. You script the
//! pages the "server" will hand out, in order, and then check that the code under test
//! asked for exactly those cursors.
//!
//! ## When to use the mock vs a real HTTP server
//!
//! | Feature | MockPageSource | wiremock + HttpPageSource |
//! |---------|----------------|---------------------------|
//! | **Speed** | Instant (in-memory) | Fast (local socket) |
//! | **Determinism** | 100% deterministic | Deterministic, real I/O |
//! | **Covers** | Pagination logic, error paths | URL building, headers, JSON decoding |
//! | **Error injection** | `return_err` | Status codes / malformed bodies |
//!
//! ## Scripting pages
//!
//! ```rust
//! use list_framework::mock::MockPageSource;
//! use list_framework::{FetchError, PageFetcher, StopReason};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPageSource::<&'static str>::new();
//!     mock.expect_page("/clients/").return_page(vec!["Иванов"], Some("/clients/?page=2"));
//!     mock.expect_page("/clients/?page=2")
//!         .return_err(FetchError::Transport("timed out".into()));
//!
//!     let collected = PageFetcher::new(mock.source()).collect("/clients/").await;
//!
//!     // The failure is swallowed; the first page survives.
//!     assert_eq!(collected.items, vec!["Иванов"]);
//!     assert!(matches!(collected.stop, StopReason::Failed(_)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Whole collections
//!
//! [`MockPageSource::script_collection`] splits a list into pages of a given size and
//! links them with `?page=N` cursors, which is what most pagination tests want.

use crate::{Cursor, FetchError, Page, PageSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A scripted answer to one page request.
struct Expectation<T> {
    cursor: Cursor,
    response: Result<Page<T>, FetchError>,
}

struct MockState<T> {
    expectations: VecDeque<Expectation<T>>,
    requests: Vec<Cursor>,
}

/// In-memory [`PageSource`] with expectation tracking.
///
/// Clones share the same script, so hand [`source()`](Self::source) to the code under
/// test and keep the original for [`verify()`](Self::verify).
pub struct MockPageSource<T> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T> Clone for MockPageSource<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: Send + 'static> Default for MockPageSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> MockPageSource<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                expectations: VecDeque::new(),
                requests: Vec::new(),
            })),
        }
    }

    /// Returns a handle to pass to the code under test.
    pub fn source(&self) -> Self {
        self.clone()
    }

    /// Expects a request for `cursor`.
    pub fn expect_page(&mut self, cursor: impl Into<Cursor>) -> PageExpectationBuilder<T> {
        PageExpectationBuilder {
            cursor: cursor.into(),
            state: self.state.clone(),
        }
    }

    /// Scripts `items` as a paginated collection rooted at `start`.
    ///
    /// The first page lives at `start`, page *k* (k ≥ 2) at `"{start}?page={k}"`. An
    /// empty collection is a single empty page.
    pub fn script_collection(&mut self, start: &str, items: Vec<T>, page_size: usize) {
        let page_size = page_size.max(1);
        let cursor_for = |k: usize| {
            if k == 1 {
                start.to_string()
            } else {
                format!("{start}?page={k}")
            }
        };

        let mut chunks: Vec<Vec<T>> = Vec::new();
        let mut iter = items.into_iter().peekable();
        while iter.peek().is_some() {
            chunks.push(iter.by_ref().take(page_size).collect());
        }
        if chunks.is_empty() {
            chunks.push(Vec::new());
        }

        let total = chunks.len();
        for (i, chunk) in chunks.into_iter().enumerate() {
            let k = i + 1;
            let next = (k < total).then(|| cursor_for(k + 1));
            self.expect_page(cursor_for(k))
                .return_page(chunk, next.as_deref());
        }
    }

    /// Cursors requested so far, in order.
    pub fn requests(&self) -> Vec<Cursor> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of scripted answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.lock().unwrap().expectations.len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl<T: Send + 'static> PageSource<T> for MockPageSource<T> {
    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<T>, FetchError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(cursor.clone());
        match state.expectations.pop_front() {
            Some(exp) if exp.cursor == *cursor => exp.response,
            Some(exp) => panic!(
                "Unexpected page request: expected {}, got {}",
                exp.cursor, cursor
            ),
            None => panic!("Unexpected page request for {}: no expectations left", cursor),
        }
    }
}

/// Builder for page expectations.
pub struct PageExpectationBuilder<T> {
    cursor: Cursor,
    state: Arc<Mutex<MockState<T>>>,
}

impl<T> PageExpectationBuilder<T> {
    /// Answer with `items`, followed by `next` if given.
    pub fn return_page(self, items: Vec<T>, next: Option<&str>) {
        let page = Page {
            items,
            next: next.map(Cursor::from),
        };
        self.push(Ok(page));
    }

    /// Answer with an error.
    pub fn return_err(self, error: FetchError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Page<T>, FetchError>) {
        self.state.lock().unwrap().expectations.push_back(Expectation {
            cursor: self.cursor,
            response,
        });
    }
}
