//! # Fetch Errors
//!
//! Errors raised while requesting a single page of a remote collection. The
//! [`PageFetcher`](crate::PageFetcher) never propagates these to its caller: it records
//! the failure in the returned [`StopReason`](crate::StopReason) and hands back the
//! items gathered so far.

/// Errors that can occur while fetching one page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// The body could not be decoded as a page of records.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The cursor could not be turned into a request URL.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// A page source was asked for something it was not prepared to answer.
    #[error("Unexpected request: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let (Some(status), true) = (e.status(), e.is_status()) {
            FetchError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
