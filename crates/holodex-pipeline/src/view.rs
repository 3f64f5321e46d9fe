//! Directory view state.
//!
//! `DirectoryView` ties the snapshot, the user's filter criteria and the
//! current page together and derives everything the shell renders from
//! them. Derived values are memoized on explicit keys, and every change
//! that invalidates the visible page bumps an enrichment generation so
//! results computed for an older page are discarded.

use crate::aggregator::AggregationState;
use crate::facets::{extract_facets, FacetMap};
use crate::filter::{apply_filters, FilterCriteria};
use crate::memo::Memo;
use crate::paginator::{self, clamp_page, PageWindow, DEFAULT_PAGE_SIZE};
use holodex_core::{Character, EnrichedCharacter, FacetField, ListingConfig};
use std::collections::HashMap;
use std::sync::Arc;

/// Identity of a snapshot allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SnapshotKey {
    ptr: usize,
    len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct WindowKey {
    snapshot: SnapshotKey,
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
}

/// What the shell should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// The user is not logged in
    Restricted,
    /// The dataset is not available yet
    Loading,
    /// Aggregation failed with this message
    Failed(String),
    /// Nothing matches; `filters_active` tells whether clearing filters could help
    Empty {
        /// Whether any search term or facet is set
        filters_active: bool,
    },
    /// The page is known but its labels are still being resolved
    Enriching,
    /// A fully enriched page
    Page {
        /// Records on the page, labelled
        records: Vec<EnrichedCharacter>,
        /// 1-based page index
        current_page: usize,
        /// Pages in the filtered view
        total_pages: usize,
    },
}

/// A request to enrich the page that was visible when it was issued.
#[derive(Debug, Clone)]
pub struct EnrichmentTicket {
    generation: u64,
    records: Vec<Character>,
}

impl EnrichmentTicket {
    /// Records to enrich.
    #[must_use]
    pub fn records(&self) -> &[Character] {
        &self.records
    }

    /// Generation the ticket was issued for.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Filter, paging and enrichment state over one dataset snapshot.
#[derive(Debug)]
pub struct DirectoryView {
    snapshot: Arc<Vec<Character>>,
    criteria: FilterCriteria,
    current_page: usize,
    page_size: usize,
    generation: u64,
    enriched: Option<Vec<EnrichedCharacter>>,
    filtered: Memo<(SnapshotKey, FilterCriteria), Arc<Vec<Character>>>,
    window: Memo<WindowKey, PageWindow>,
    facets: HashMap<FacetField, Memo<SnapshotKey, FacetMap>>,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl DirectoryView {
    /// Create an empty view on page 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            snapshot: Arc::new(Vec::new()),
            criteria: FilterCriteria::default(),
            current_page: 1,
            page_size,
            generation: 0,
            enriched: None,
            filtered: Memo::new(),
            window: Memo::new(),
            facets: HashMap::new(),
        }
    }

    /// Create an empty view using the configured page size.
    #[must_use]
    pub fn from_config(config: &ListingConfig) -> Self {
        Self::new(config.page_size)
    }

    /// Point the view at a new snapshot.
    ///
    /// The current page is clamped into the new range. Replacing the
    /// snapshot with the same allocation is a no-op.
    pub fn set_snapshot(&mut self, snapshot: Arc<Vec<Character>>) {
        if Arc::ptr_eq(&self.snapshot, &snapshot) {
            return;
        }
        self.snapshot = snapshot;
        self.filtered.invalidate();
        self.window.invalidate();
        self.facets.clear();
        self.current_page = clamp_page(self.current_page, self.total_pages());
        self.bump_generation();
    }

    /// The snapshot currently viewed.
    #[must_use]
    pub fn snapshot(&self) -> &Arc<Vec<Character>> {
        &self.snapshot
    }

    /// Active filter criteria.
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Change the name search term and return to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.criteria.search_term == term {
            return;
        }
        self.criteria.search_term = term;
        self.reset_page();
    }

    /// Select `url` for one facet (empty clears it) and return to page 1.
    pub fn set_facet(&mut self, field: FacetField, url: impl Into<String>) {
        let url = url.into();
        if self.criteria.facet(field) == url {
            return;
        }
        self.criteria.set_facet(field, url);
        self.reset_page();
    }

    /// Replace all criteria and return to page 1.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        if self.criteria == criteria {
            return;
        }
        self.criteria = criteria;
        self.reset_page();
    }

    /// Drop every criterion and return to page 1.
    pub fn clear_filters(&mut self) {
        self.set_filters(FilterCriteria::default());
    }

    /// Current 1-based page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Records per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Move to `page`, clamped into the valid range. Returns the page landed on.
    pub fn set_page(&mut self, page: usize) -> usize {
        let page = clamp_page(page, self.total_pages());
        if page != self.current_page {
            self.current_page = page;
            self.bump_generation();
        }
        page
    }

    /// Facet map for `field` over the current snapshot.
    pub fn facets(&mut self, field: FacetField) -> &FacetMap {
        let key = self.snapshot_key();
        let snapshot = &self.snapshot;
        self.facets
            .entry(field)
            .or_default()
            .get_or_compute(key, || extract_facets(snapshot, field))
    }

    /// Records matching the current criteria, in snapshot order.
    pub fn filtered(&mut self) -> Arc<Vec<Character>> {
        let key = (self.snapshot_key(), self.criteria.clone());
        let snapshot = &self.snapshot;
        let criteria = &self.criteria;
        Arc::clone(
            self.filtered
                .get_or_compute(key, || Arc::new(apply_filters(snapshot, criteria))),
        )
    }

    /// Pages in the filtered view.
    pub fn total_pages(&mut self) -> usize {
        paginator::total_pages(self.filtered().len(), self.page_size)
    }

    /// The visible page of the filtered view.
    pub fn page_window(&mut self) -> &PageWindow {
        let filtered = self.filtered();
        let key = WindowKey {
            snapshot: self.snapshot_key(),
            criteria: self.criteria.clone(),
            page: self.current_page,
            page_size: self.page_size,
        };
        let (page, page_size) = (self.current_page, self.page_size);
        self.window
            .get_or_compute(key, || PageWindow::new(&filtered, page, page_size))
    }

    /// Issue a ticket for enriching the visible page.
    pub fn begin_enrichment(&mut self) -> EnrichmentTicket {
        let records = self.page_window().records.clone();
        EnrichmentTicket {
            generation: self.generation,
            records,
        }
    }

    /// Store enriched records if `ticket` still refers to the visible page.
    ///
    /// Returns `false` and discards `records` when the page, the filters or
    /// the snapshot changed after the ticket was issued.
    pub fn apply_enrichment(
        &mut self,
        ticket: &EnrichmentTicket,
        records: Vec<EnrichedCharacter>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding stale enrichment for generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.enriched = Some(records);
        true
    }

    /// Enriched records for the visible page, once applied.
    #[must_use]
    pub fn enriched(&self) -> Option<&[EnrichedCharacter]> {
        self.enriched.as_deref()
    }

    /// Decide what to render.
    pub fn display_state(
        &mut self,
        is_authorized: bool,
        aggregation: &AggregationState,
    ) -> DisplayState {
        if !is_authorized {
            return DisplayState::Restricted;
        }

        match aggregation {
            AggregationState::Idle | AggregationState::Loading => DisplayState::Loading,
            AggregationState::Failed(message) => DisplayState::Failed(message.clone()),
            AggregationState::Ready => {
                let total_pages = self.total_pages();
                if total_pages == 0 {
                    return DisplayState::Empty {
                        filters_active: self.criteria.is_active(),
                    };
                }
                match &self.enriched {
                    None => DisplayState::Enriching,
                    Some(records) => DisplayState::Page {
                        records: records.clone(),
                        current_page: self.current_page,
                        total_pages,
                    },
                }
            }
        }
    }

    fn snapshot_key(&self) -> SnapshotKey {
        SnapshotKey {
            ptr: Arc::as_ptr(&self.snapshot) as usize,
            len: self.snapshot.len(),
        }
    }

    fn reset_page(&mut self) {
        self.current_page = 1;
        self.bump_generation();
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.enriched = None;
    }
}
