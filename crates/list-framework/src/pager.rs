//! # Local Pager
//!
//! Client-side paging over an already fetched and derived list. The pager only tracks
//! numbers (current page, page size, list length); the list itself stays with the
//! caller and is sliced on demand.
//!
//! Pages are 1-based. The current page always lies in `[1, page_count()]`, and
//! `page_count()` is never below 1, so an empty list still has one (empty) page.

use std::ops::Range;

/// Page size used throughout the CRM screens.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// One entry of a compact pager widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    /// Pages were skipped between the neighbouring links.
    Gap,
}

/// Current-page state for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPager {
    page: usize,
    page_size: usize,
    len: usize,
    identity: u64,
}

impl Default for LocalPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl LocalPager {
    /// A pager on page 1 of an empty list. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            len: 0,
            identity: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `max(1, ceil(len / page_size))`.
    pub fn page_count(&self) -> usize {
        self.len.div_ceil(self.page_size).max(1)
    }

    /// Whether there is more than one page to show a pager for.
    pub fn is_paginated(&self) -> bool {
        self.len > self.page_size
    }

    /// Tell the pager which list it is paging.
    ///
    /// `identity` is any value that changes whenever the derived list is recomputed from
    /// different inputs. If it or the length differs from what the pager last saw, the
    /// pager goes back to page 1 and returns `true`.
    pub fn observe(&mut self, identity: u64, len: usize) -> bool {
        if identity == self.identity && len == self.len {
            return false;
        }
        self.identity = identity;
        self.len = len;
        self.page = 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Go to page `n`, clamped to `[1, page_count()]`. Returns the page now shown.
    pub fn set_page(&mut self, n: usize) -> usize {
        self.page = n.clamp(1, self.page_count());
        self.page
    }

    pub fn next(&mut self) -> usize {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> usize {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Index range of the current page within the list.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.len);
        let end = (start + self.page_size).min(self.len);
        start..end
    }

    /// The current page of `items`. Tolerates `items` being shorter than the length the
    /// pager last observed.
    pub fn slice<'s, U>(&self, items: &'s [U]) -> &'s [U] {
        let Range { start, end } = self.range();
        let end = end.min(items.len());
        &items[start.min(end)..end]
    }

    /// 1-based position in the whole list of the item at `index` on the current page.
    pub fn row_number(&self, index: usize) -> usize {
        (self.page - 1) * self.page_size + index + 1
    }

    /// Links for a compact pager: first, last, and the neighbours of the current page,
    /// with [`PageLink::Gap`] where pages are skipped.
    pub fn window(&self) -> Vec<PageLink> {
        let last = self.page_count();
        let mut pages = vec![1, self.page.saturating_sub(1), self.page, self.page + 1, last];
        pages.retain(|n| (1..=last).contains(n));
        pages.sort_unstable();
        pages.dedup();

        let mut links = Vec::with_capacity(pages.len() * 2);
        let mut prev: Option<usize> = None;
        for n in pages {
            if let Some(p) = prev {
                if n - p > 1 {
                    links.push(PageLink::Gap);
                }
            }
            links.push(PageLink::Page(n));
            prev = Some(n);
        }
        links
    }
}
