//! Local pagination of the filtered view.
//!
//! Independent of the remote source's own paging: pages here are fixed-size
//! windows over whatever the filter engine produced, addressed by a 1-based
//! index.

use holodex_core::Character;

/// Records per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` records. Zero records means zero pages.
#[must_use]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The records on 1-based `page`, or an empty slice when the page is out of range.
#[must_use]
pub fn slice<T>(view: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= view.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(view.len());
    &view[start..end]
}

/// Bring `page` into `[1, total_pages]`; 1 when there are no pages.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    if total_pages == 0 {
        1
    } else {
        page.clamp(1, total_pages)
    }
}

/// One page of the filtered view along with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Records on this page
    pub records: Vec<Character>,
    /// 1-based page index
    pub current_page: usize,
    /// Pages in the filtered view
    pub total_pages: usize,
    /// Size of the filtered view
    pub filtered_count: usize,
}

impl PageWindow {
    /// Cut page `current_page` out of `view`.
    #[must_use]
    pub fn new(view: &[Character], current_page: usize, page_size: usize) -> Self {
        Self {
            records: slice(view, current_page, page_size).to_vec(),
            current_page,
            total_pages: total_pages(view.len(), page_size),
            filtered_count: view.len(),
        }
    }

    /// Whether this page has nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
