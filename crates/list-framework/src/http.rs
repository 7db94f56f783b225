//! # HTTP Page Source
//!
//! [`HttpTransport`] holds everything shared by the collections of one API (client,
//! base URL, credentials, static query parameters). [`HttpPageSource<T>`] is the typed
//! view of that transport for one record type; it is cheap to create and to clone.

use crate::{Cursor, FetchError, Page, PageBody, PageSource};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, instrument};

/// Shared HTTP plumbing for one remote API.
///
/// Credentials are handed in explicitly; nothing here reads process-wide state.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    query: Vec<(String, String)>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidCursor(format!("{base_url}: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
            query: Vec::new(),
        })
    }

    /// Replace the underlying client, e.g. one built with a request timeout.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Apply a per-request timeout.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(self.with_client(client))
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a query parameter merged into every page request.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A typed page source for one collection of this API.
    pub fn source<T>(&self) -> HttpPageSource<T> {
        HttpPageSource {
            transport: self.clone(),
            _record: PhantomData,
        }
    }

    /// Turn a cursor into the URL to request.
    ///
    /// Absolute cursors (the server's `next` links) are used as-is; relative ones are
    /// appended to the base URL, keeping any path prefix the base carries. Static query
    /// parameters are added unless the cursor already sets that key, so a `next` link
    /// that echoes them back is not doubled up.
    pub fn resolve(&self, cursor: &Cursor) -> Result<Url, FetchError> {
        let raw = cursor.as_str().trim();
        if raw.is_empty() {
            return Err(FetchError::InvalidCursor("empty cursor".to_string()));
        }

        let mut url = if raw.starts_with("http://") || raw.starts_with("https://") {
            Url::parse(raw)
        } else {
            let base = self.base_url.as_str().trim_end_matches('/');
            Url::parse(&format!("{base}/{}", raw.trim_start_matches('/')))
        }
        .map_err(|e| FetchError::InvalidCursor(format!("{raw}: {e}")))?;

        let present: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        let missing: Vec<&(String, String)> = self
            .query
            .iter()
            .filter(|(k, _)| !present.iter().any(|p| p == k))
            .collect();
        if !missing.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in missing {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// GET one page and decode it.
    pub async fn get_page<T: DeserializeOwned>(&self, cursor: &Cursor) -> Result<Page<T>, FetchError> {
        let url = self.resolve(cursor)?;
        debug!(%url, "GET page");

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        let body: PageBody = serde_json::from_slice(&bytes)?;
        Ok(body.into_page())
    }
}

/// [`PageSource`] backed by an [`HttpTransport`].
pub struct HttpPageSource<T> {
    transport: HttpTransport,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpPageSource<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> HttpPageSource<T> {
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

#[async_trait]
impl<T> PageSource<T> for HttpPageSource<T>
where
    T: DeserializeOwned + Send,
{
    #[instrument(skip(self), fields(cursor = %cursor))]
    async fn fetch_page(&self, cursor: &Cursor) -> Result<Page<T>, FetchError> {
        self.transport.get_page(cursor).await
    }

    /// The absolute URL the cursor resolves to, so a relative start path and the
    /// server's absolute link to the same page compare equal.
    fn canonical(&self, cursor: &Cursor) -> Cursor {
        self.transport
            .resolve(cursor)
            .map(|url| Cursor::new(url.to_string()))
            .unwrap_or_else(|_| cursor.clone())
    }
}
