//! # CollectionClient Trait
//!
//! Common interface for the per-collection clients: each one wraps a [`PageFetcher`] and
//! names its endpoint, and gets `collect` / `fetch_all` for free.
use list_framework::{Collected, Cursor, PageFetcher, PageSource};
use std::sync::Arc;

/// Type-erased page source, so clients are not generic over the transport.
pub type SharedSource<T> = Arc<dyn PageSource<T>>;

/// The fetcher every client wraps.
pub type Fetcher<T> = PageFetcher<T, SharedSource<T>>;

/// Trait for collection clients to inherit the standard "read everything" operations.
///
/// # Example
///
/// ```rust
/// use crm_app::clients::{CollectionClient, Fetcher, SharedSource};
/// use list_framework::mock::MockPageSource;
/// use list_framework::{Cursor, PageFetcher};
/// use std::sync::Arc;
///
/// struct TagsClient {
///     inner: Fetcher<String>,
/// }
///
/// impl CollectionClient<String> for TagsClient {
///     fn inner(&self) -> &Fetcher<String> {
///         &self.inner
///     }
///
///     fn endpoint(&self) -> Cursor {
///         Cursor::new("/tags/")
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mut mock = MockPageSource::new();
///     mock.expect_page("/tags/").return_page(vec!["vip".to_string()], None);
///
///     let source: SharedSource<String> = Arc::new(mock.source());
///     let client = TagsClient { inner: PageFetcher::new(source) };
///
///     // fetch_all() and collect() are provided automatically!
///     assert_eq!(client.fetch_all().await, vec!["vip".to_string()]);
/// }
/// ```
#[async_trait::async_trait]
pub trait CollectionClient<T: Send + 'static>: Send + Sync {
    /// Access the wrapped fetcher.
    fn inner(&self) -> &Fetcher<T>;

    /// First page of the collection.
    fn endpoint(&self) -> Cursor;

    /// Read every page and report how the walk ended.
    #[tracing::instrument(skip(self))]
    async fn collect(&self) -> Collected<T> {
        tracing::debug!(endpoint = %self.endpoint(), "Collecting");
        self.inner().collect(self.endpoint()).await
    }

    /// Read every page, keeping whatever arrived before a failure.
    async fn fetch_all(&self) -> Vec<T> {
        self.collect().await.into_items()
    }
}
