//! # View Deriver
//!
//! [`derive_view`] maps (records, search text, filter values, sort key) to the ordered
//! subset a screen shows. It is a pure function: the same inputs always give the same
//! output, and nothing is cached between calls.
//!
//! ## Pipeline
//!
//! 1. **Filter**: every active [`FilterValue`] must equal the record's category value.
//! 2. **Search**: the trimmed, case-folded search text must occur in at least one of the
//!    record's [`search_fields`](crate::ListRecord::search_fields). Empty text keeps all.
//! 3. **Sort**: by the [`SortKey`]; `sort_by` is stable so ties keep input order.

use crate::collate;
use crate::record::ListRecord;
use std::cmp::Ordering;

/// The sort orders offered by list screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    /// Most recently created first.
    #[default]
    Newest,
    Oldest,
    /// Largest value first (visit count, payout, amount).
    ValueDesc,
    /// Most recent activity first; records without activity last.
    LastActivity,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::ValueDesc,
        SortKey::LastActivity,
    ];

    /// The token used in query strings and select boxes.
    pub fn token(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::ValueDesc => "value_desc",
            SortKey::LastActivity => "last_visit",
        }
    }

    /// Parse a token, accepting the per-screen aliases of `ValueDesc`.
    pub fn from_token(token: &str) -> Option<Self> {
        let key = match token.trim().to_ascii_lowercase().as_str() {
            "name_asc" => SortKey::NameAsc,
            "name_desc" => SortKey::NameDesc,
            "price_asc" => SortKey::PriceAsc,
            "price_desc" => SortKey::PriceDesc,
            "newest" => SortKey::Newest,
            "oldest" => SortKey::Oldest,
            "value_desc" | "visits_desc" | "payout_desc" | "amount_desc" => SortKey::ValueDesc,
            "last_visit" | "last_activity" => SortKey::LastActivity,
            _ => return None,
        };
        Some(key)
    }

    /// Parse a token; anything unrecognised means the default order.
    pub fn parse_or_default(token: &str) -> Self {
        Self::from_token(token).unwrap_or_default()
    }

    /// Compare two records under this key.
    pub fn compare<T: ListRecord>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortKey::NameAsc => compare_names(a, b),
            SortKey::NameDesc => compare_names(b, a),
            SortKey::PriceAsc => num(a.sort_price()).total_cmp(&num(b.sort_price())),
            SortKey::PriceDesc => num(b.sort_price()).total_cmp(&num(a.sort_price())),
            SortKey::Newest => millis(b.created_at()).cmp(&millis(a.created_at())),
            SortKey::Oldest => millis(a.created_at()).cmp(&millis(b.created_at())),
            SortKey::ValueDesc => num(b.sort_value()).total_cmp(&num(a.sort_value())),
            SortKey::LastActivity => match (a.last_activity(), b.last_activity()) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => y.cmp(&x),
            },
        }
    }
}

fn compare_names<T: ListRecord>(a: &T, b: &T) -> Ordering {
    let a = a.sort_name().unwrap_or_default();
    let b = b.sort_name().unwrap_or_default();
    collate::compare(&a, &b)
}

fn num(v: Option<f64>) -> f64 {
    v.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn millis(v: Option<chrono::DateTime<chrono::Utc>>) -> i64 {
    v.map(|d| d.timestamp_millis()).unwrap_or(0)
}

/// A categorical filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    /// The "all" sentinel: the filter is inactive.
    #[default]
    All,
    Exact(String),
}

impl FilterValue {
    /// `""` and `"all"` (any case) are the sentinel; anything else is an exact value.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            FilterValue::All
        } else {
            FilterValue::Exact(value.to_string())
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FilterValue::Exact(_))
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Exact(want) => value.unwrap_or("") == want,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::parse(value)
    }
}

/// Search text, filter selections and sort key of one list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F> {
    search: String,
    filters: Vec<(F, FilterValue)>,
    sort: SortKey,
}

impl<F> Default for ViewState<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            sort: SortKey::default(),
        }
    }
}

impl<F: Copy + Eq> ViewState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_filter(mut self, field: F, value: impl Into<FilterValue>) -> Self {
        self.set_filter(field, value);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Set or replace the selection for `field`.
    pub fn set_filter(&mut self, field: F, value: impl Into<FilterValue>) {
        let value = value.into();
        match self.filters.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.filters.push((field, value)),
        }
    }

    pub fn filter(&self, field: F) -> &FilterValue {
        static ALL: FilterValue = FilterValue::All;
        self.filters
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
            .unwrap_or(&ALL)
    }

    pub fn filters(&self) -> impl Iterator<Item = (F, &FilterValue)> + '_ {
        self.filters.iter().map(|(f, v)| (*f, v))
    }

    /// Whether anything differs from a freshly created state.
    pub fn has_filters(&self) -> bool {
        !self.search.trim().is_empty()
            || self.filters.iter().any(|(_, v)| v.is_active())
            || self.sort != SortKey::default()
    }

    /// Back to empty search, no filters, default sort.
    pub fn reset(&mut self) {
        self.search.clear();
        self.filters.clear();
        self.sort = SortKey::default();
    }
}

/// The filtered and sorted, not yet paged, subset of a collection.
#[derive(Debug)]
pub struct DerivedView<'a, T> {
    items: Vec<&'a T>,
}

impl<'a, T> DerivedView<'a, T> {
    pub fn items(&self) -> &[&'a T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().copied()
    }

    pub fn into_items(self) -> Vec<&'a T> {
        self.items
    }
}

impl<'a, T: Clone> DerivedView<'a, T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().map(|r| (*r).clone()).collect()
    }
}

/// Whether `record` contains `folded` (already trimmed and lower-cased) in any of its
/// search fields.
pub fn matches_search<T: ListRecord>(record: &T, folded: &str) -> bool {
    folded.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| collate::contains_folded(field, folded))
}

/// Whether `record` passes every active filter of `state`.
pub fn matches_filters<T: ListRecord>(record: &T, state: &ViewState<T::Field>) -> bool {
    state
        .filters()
        .all(|(field, value)| value.matches(record.category(field).as_deref()))
}

/// Filter, search and sort `records` according to `state`.
pub fn derive_view<'a, T: ListRecord>(records: &'a [T], state: &ViewState<T::Field>) -> DerivedView<'a, T> {
    let needle = collate::fold(state.search().trim());
    let mut items: Vec<&T> = records
        .iter()
        .filter(|r| matches_filters(*r, state))
        .filter(|r| matches_search(*r, &needle))
        .collect();

    let key = state.sort();
    items.sort_by(|a, b| key.compare(*a, *b));
    DerivedView { items }
}
