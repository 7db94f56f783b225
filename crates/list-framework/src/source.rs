//! # PageSource Trait
//!
//! The seam between the fetcher and whatever serves pages: the HTTP transport in
//! production, [`MockPageSource`](crate::mock::MockPageSource) in tests.
use crate::{Cursor, FetchError, Page};
use async_trait::async_trait;
use std::sync::Arc;

/// Something that can answer "give me the page behind this cursor".
///
/// Implementations perform exactly one request per call and do no pagination of their
/// own; following `next` pointers is the job of [`PageFetcher`](crate::PageFetcher).
///
/// # Example
///
/// ```rust
/// use list_framework::{Cursor, FetchError, Page, PageSource};
/// use async_trait::async_trait;
///
/// struct Numbers;
///
/// #[async_trait]
/// impl PageSource<u32> for Numbers {
///     async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<u32>, FetchError> {
///         match cursor.as_str() {
///             "/numbers/" => Ok(Page::with_next(vec![1, 2], "/numbers/?page=2")),
///             "/numbers/?page=2" => Ok(Page::last(vec![3])),
///             other => Err(FetchError::Unexpected(other.to_string())),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    /// Fetch the single page addressed by `cursor`.
    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<T>, FetchError>;

    /// The form of `cursor` used to recognise a page that was already fetched.
    ///
    /// Two cursors that address the same page must map to the same value, e.g. a
    /// relative start path and the absolute link a server echoes back for it.
    fn canonical(&self, cursor: &Cursor) -> Cursor {
        cursor.clone()
    }
}

#[async_trait]
impl<T, S> PageSource<T> for Arc<S>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<T>, FetchError> {
        (**self).fetch_page(cursor).await
    }

    fn canonical(&self, cursor: &Cursor) -> Cursor {
        (**self).canonical(cursor)
    }
}
