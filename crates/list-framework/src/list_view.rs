//! # ListView
//!
//! Owns one screen's worth of list state: the fetched records, the [`ViewState`] and the
//! [`LocalPager`]. Every mutation goes through a method that bumps a generation counter,
//! so the pager always snaps back to page 1 when the derived list changes underneath it.

use crate::pager::{LocalPager, PageLink};
use crate::record::ListRecord;
use crate::view::{derive_view, DerivedView, FilterValue, SortKey, ViewState};
use tracing::debug;

/// Records plus the user's search/filter/sort/page choices for them.
///
/// # Example
///
/// ```rust
/// use list_framework::{ListRecord, ListView, NoFields};
/// use std::borrow::Cow;
///
/// #[derive(Clone, Debug)]
/// struct Row(u32);
///
/// impl ListRecord for Row {
///     type Id = u32;
///     type Field = NoFields;
///     fn id(&self) -> u32 { self.0 }
///     fn search_fields(&self) -> Vec<Cow<'_, str>> { vec![Cow::Owned(self.0.to_string())] }
///     fn category(&self, field: NoFields) -> Option<Cow<'_, str>> { match field {} }
/// }
///
/// let mut view = ListView::new(12);
/// view.replace_records((1..=25).map(Row).collect());
/// assert_eq!(view.page_count(), 3);
/// assert_eq!(view.set_page(3), 3);
/// assert_eq!(view.visible().len(), 1);
///
/// view.set_search("2");
/// assert_eq!(view.page(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ListView<T: ListRecord> {
    records: Vec<T>,
    state: ViewState<T::Field>,
    pager: LocalPager,
    generation: u64,
}

impl<T: ListRecord> Default for ListView<T> {
    fn default() -> Self {
        Self::with_pager(LocalPager::default())
    }
}

impl<T: ListRecord> ListView<T> {
    pub fn new(page_size: usize) -> Self {
        Self::with_pager(LocalPager::new(page_size))
    }

    fn with_pager(pager: LocalPager) -> Self {
        Self {
            records: Vec::new(),
            state: ViewState::default(),
            pager,
            generation: 0,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn state(&self) -> &ViewState<T::Field> {
        &self.state
    }

    pub fn pager(&self) -> &LocalPager {
        &self.pager
    }

    /// Replace the whole collection, e.g. after a fresh fetch.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.touch();
    }

    /// Insert `record`, replacing any record with the same id. Returns the replaced one.
    pub fn upsert(&mut self, record: T) -> Option<T> {
        let id = record.id();
        let replaced = match self.records.iter_mut().find(|r| r.id() == id) {
            Some(slot) => Some(std::mem::replace(slot, record)),
            None => {
                self.records.push(record);
                None
            }
        };
        self.touch();
        replaced
    }

    /// Remove the record with `id`, handing it back to the caller.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let pos = self.records.iter().position(|r| r.id() == *id)?;
        let removed = self.records.remove(pos);
        self.touch();
        Some(removed)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.set_search(search);
        self.touch();
    }

    pub fn set_filter(&mut self, field: T::Field, value: impl Into<FilterValue>) {
        self.state.set_filter(field, value);
        self.touch();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.set_sort(sort);
        self.touch();
    }

    /// Clear search and filters and restore the default sort.
    pub fn reset_filters(&mut self) {
        self.state.reset();
        self.touch();
    }

    /// The filtered and sorted list, not yet paged.
    pub fn derived(&self) -> DerivedView<'_, T> {
        derive_view(&self.records, &self.state)
    }

    /// The records on the current page.
    pub fn visible(&self) -> Vec<&T> {
        let derived = self.derived();
        self.pager.slice(derived.items()).to_vec()
    }

    /// Length of the derived list.
    pub fn total(&self) -> usize {
        self.pager.len()
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    pub fn set_page(&mut self, n: usize) -> usize {
        self.pager.set_page(n)
    }

    pub fn next_page(&mut self) -> usize {
        self.pager.next()
    }

    pub fn prev_page(&mut self) -> usize {
        self.pager.prev()
    }

    pub fn window(&self) -> Vec<PageLink> {
        self.pager.window()
    }

    fn touch(&mut self) {
        self.generation += 1;
        let len = self.derived().len();
        self.pager.observe(self.generation, len);
        debug!(generation = self.generation, len, "View recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoFields;
    use std::borrow::Cow;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: String,
    }

    impl ListRecord for Row {
        type Id = u32;
        type Field = NoFields;

        fn id(&self) -> u32 {
            self.id
        }

        fn search_fields(&self) -> Vec<Cow<'_, str>> {
            vec![Cow::Borrowed(&self.label)]
        }

        fn category(&self, field: NoFields) -> Option<Cow<'_, str>> {
            match field {}
        }
    }

    fn rows(n: u32) -> Vec<Row> {
        (1..=n)
            .map(|id| Row {
                id,
                label: format!("row {id}"),
            })
            .collect()
    }

    #[test]
    fn visible_follows_pages() {
        let mut view = ListView::new(12);
        view.replace_records(rows(25));
        let ids: Vec<u32> = view.visible().iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());

        view.set_page(3);
        let ids: Vec<u32> = view.visible().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![25]);
    }

    #[test]
    fn any_change_returns_to_first_page() {
        let mut view = ListView::new(5);
        view.replace_records(rows(20));
        view.set_page(4);

        view.set_sort(SortKey::NameDesc);
        assert_eq!(view.page(), 1);

        view.set_page(2);
        view.set_search("row 1");
        assert_eq!(view.page(), 1);
        // "row 1" and "row 10".."row 19"
        assert_eq!(view.total(), 11);

        view.set_page(3);
        view.reset_filters();
        assert_eq!(view.page(), 1);
        assert_eq!(view.total(), 20);
    }

    #[test]
    fn remove_and_upsert() {
        let mut view = ListView::new(12);
        view.replace_records(rows(3));

        let removed = view.remove(&2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(view.records().len(), 2);
        assert!(view.remove(&2).is_none());

        let old = view.upsert(Row {
            id: 1,
            label: "renamed".into(),
        });
        assert_eq!(old.unwrap().label, "row 1");
        assert!(view
            .upsert(Row {
                id: 9,
                label: "new".into()
            })
            .is_none());
        assert_eq!(view.total(), 3);
    }
}
