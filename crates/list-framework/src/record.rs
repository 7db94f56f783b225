//! # ListRecord Trait
//!
//! The `ListRecord` trait is the contract every collection item (appointment, client,
//! service, cash-flow entry, …) implements so that one generic deriver can search,
//! filter and sort it. A record only says *where* its fields are; the deriver owns all
//! of the list logic.
//!
//! # Architecture Note
//! The same search/filter/sort/page code used to be written once per screen. With the
//! accessors below, a screen supplies a `ListRecord` impl and nothing else.
//!
//! # Provided Methods
//! The sort accessors ([`sort_name`](ListRecord::sort_name),
//! [`sort_price`](ListRecord::sort_price), [`created_at`](ListRecord::created_at),
//! [`sort_value`](ListRecord::sort_value), [`last_activity`](ListRecord::last_activity))
//! default to `None`. A missing value sorts as the empty string, zero, or the epoch.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any item of a remote collection implements to be listed by
/// [`derive_view`](crate::derive_view) and [`ListView`](crate::ListView).
///
/// # Example
///
/// ```rust
/// use list_framework::{derive_view, ListRecord, NoFields, SortKey, ViewState};
/// use std::borrow::Cow;
///
/// #[derive(Clone, Debug)]
/// struct Service { id: u32, name: String, price: f64 }
///
/// impl ListRecord for Service {
///     type Id = u32;
///     type Field = NoFields;
///
///     fn id(&self) -> u32 { self.id }
///     fn search_fields(&self) -> Vec<Cow<'_, str>> { vec![Cow::Borrowed(&self.name)] }
///     fn category(&self, field: NoFields) -> Option<Cow<'_, str>> { match field {} }
///     fn sort_name(&self) -> Option<Cow<'_, str>> { Some(Cow::Borrowed(&self.name)) }
///     fn sort_price(&self) -> Option<f64> { Some(self.price) }
/// }
///
/// let services = vec![
///     Service { id: 1, name: "Стрижка".into(), price: 500.0 },
///     Service { id: 2, name: "Бритьё".into(), price: 300.0 },
/// ];
/// let state = ViewState::new().with_sort(SortKey::PriceAsc);
/// let view = derive_view(&services, &state);
/// assert_eq!(view.items()[0].id, 2);
/// ```
pub trait ListRecord: Clone + Send + Sync + 'static {
    /// The identifier of this record on the server.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The categorical fields this record can be filtered on.
    /// Use [`NoFields`] when there are none.
    type Field: Copy + Eq + Hash + Debug + Send + Sync;

    fn id(&self) -> Self::Id;

    /// The designated string fields matched against the search text.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// The value of a categorical field, compared by exact equality.
    fn category(&self, field: Self::Field) -> Option<Cow<'_, str>>;

    /// Used by `NameAsc` / `NameDesc`.
    fn sort_name(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Used by `PriceAsc` / `PriceDesc`.
    fn sort_price(&self) -> Option<f64> {
        None
    }

    /// Used by `Newest` / `Oldest`.
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Used by `ValueDesc` (visit count, payout, amount, ...).
    fn sort_value(&self) -> Option<f64> {
        None
    }

    /// Used by `LastActivity`.
    fn last_activity(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Field type for records without categorical filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoFields {}
