//! # Pages and Cursors
//!
//! A remote collection is read one [`Page`] at a time. Each page may point at the next
//! one through an opaque [`Cursor`]; the fetcher treats the cursor as an identity and
//! never looks inside it.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{self, Display};
use tracing::{debug, warn};

/// Opaque pointer to a page of a remote collection.
///
/// In practice this is whatever the server put in its `next` field, usually an absolute
/// URL, or the relative endpoint the first request starts from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One page of records plus the pointer to the page after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<Cursor>,
}

impl<T> Page<T> {
    /// A page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// A page followed by `next`.
    pub fn with_next(items: Vec<T>, next: impl Into<Cursor>) -> Self {
        Self {
            items,
            next: Some(next.into()),
        }
    }
}

/// Wire shape of a page body.
///
/// Collection endpoints answer either with an envelope
/// (`{"count": .., "next": .., "previous": .., "results": [..]}`) or, for small
/// unpaginated collections, with a bare JSON array. A bare array is a final page.
///
/// Records are kept as raw JSON until [`PageBody::into_page`] decodes them one by one,
/// so a single malformed record costs only itself and not the whole page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageBody {
    Envelope {
        results: Vec<Value>,
        #[serde(default)]
        next: Option<String>,
    },
    Bare(Vec<Value>),
}

impl PageBody {
    /// Decode every record as `T`, skipping (and logging) the ones that do not fit.
    pub fn into_page<T: DeserializeOwned>(self) -> Page<T> {
        let (raw, next) = match self {
            // Some backends send "" instead of null on the last page.
            PageBody::Envelope { results, next } => {
                (results, next.filter(|n| !n.trim().is_empty()).map(Cursor::from))
            }
            PageBody::Bare(items) => (items, None),
        };

        let total = raw.len();
        let items: Vec<T> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(index, error = %e, "Skipping record that failed to decode");
                    None
                }
            })
            .collect();
        if items.len() < total {
            debug!(kept = items.len(), skipped = total - items.len(), "Page decoded with gaps");
        }
        Page { items, next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn envelope_with_next() {
        let body: PageBody = serde_json::from_str(
            r#"{"count": 3, "next": "http://api/x/?page=2", "previous": null, "results": [{"id": 1}]}"#,
        )
        .unwrap();
        let page: Page<Row> = body.into_page();
        assert_eq!(page.items, vec![Row { id: 1 }]);
        assert_eq!(page.next, Some(Cursor::from("http://api/x/?page=2")));
    }

    #[test]
    fn envelope_with_null_or_empty_next_is_final() {
        let null: PageBody = serde_json::from_str(r#"{"next": null, "results": []}"#).unwrap();
        assert_eq!(null.into_page::<Row>().next, None);

        let empty: PageBody =
            serde_json::from_str(r#"{"next": "", "results": [{"id": 2}]}"#).unwrap();
        assert_eq!(empty.into_page::<Row>().next, None);
    }

    #[test]
    fn bare_array_is_final_page() {
        let body: PageBody = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        let page: Page<Row> = body.into_page();
        assert_eq!(page.items.len(), 2);
        assert!(page.next.is_none());
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let body: PageBody = serde_json::from_str(
            r#"{"next": "http://api/x/?page=2", "results": [{"id": 1}, {"name": "no id"}, {"id": "seven"}, {"id": 3}]}"#,
        )
        .unwrap();
        let page: Page<Row> = body.into_page();
        assert_eq!(page.items, vec![Row { id: 1 }, Row { id: 3 }]);
        assert_eq!(page.next, Some(Cursor::from("http://api/x/?page=2")));

        let bare: PageBody = serde_json::from_str(r#"[null, {"id": 5}]"#).unwrap();
        assert_eq!(bare.into_page::<Row>().items, vec![Row { id: 5 }]);
    }
}
