//! Dataset aggregation.
//!
//! The `DatasetAggregator` drains a [`PageSource`] page by page into a
//! single in-memory snapshot. It is the only writer of that snapshot and
//! replaces it wholesale; readers hold an `Arc` to whatever version was
//! current when they asked.

use crate::error::{PipelineError, Result};
use holodex_core::Character;
use holodex_source::{PageRequest, PageSource};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default upper bound on followed `next` links.
pub const DEFAULT_MAX_PAGES: u32 = 100;

/// Lifecycle of an aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationState {
    /// Nothing requested yet
    Idle,
    /// Pages are being fetched
    Loading,
    /// The snapshot holds the complete collection
    Ready,
    /// The last attempt failed; the snapshot is empty
    Failed(String),
}

impl AggregationState {
    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, AggregationState::Loading)
    }

    /// The failure message, if the last attempt failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            AggregationState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

struct Inner {
    state: AggregationState,
    snapshot: Arc<Vec<Character>>,
}

/// Puts back the pre-`Loading` state if a `start` future is dropped mid-fetch.
struct LoadingGuard<'a> {
    inner: &'a RwLock<Inner>,
    previous: Option<AggregationState>,
}

impl LoadingGuard<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            tracing::warn!("Aggregation cancelled, restoring {:?} state", previous);
            self.inner
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .state = previous;
        }
    }
}

/// Owns the complete dataset snapshot assembled from a paginated source.
pub struct DatasetAggregator {
    source: Arc<dyn PageSource>,
    max_pages: u32,
    inner: RwLock<Inner>,
}

impl DatasetAggregator {
    /// Create an idle aggregator over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
            inner: RwLock::new(Inner {
                state: AggregationState::Idle,
                snapshot: Arc::new(Vec::new()),
            }),
        }
    }

    /// Set the maximum number of pages a single aggregation may follow.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Drain the source into a fresh snapshot.
    ///
    /// Returns `false` without fetching anything if an aggregation is
    /// already in flight. On failure the snapshot is emptied and the state
    /// carries the error message; nothing is returned to the caller since
    /// the outcome is observable through [`state`](Self::state). Dropping
    /// the returned future mid-fetch restores the state held before the call.
    pub async fn start(&self) -> bool {
        let guard = {
            let mut inner = self.write();
            if inner.state.is_loading() {
                tracing::debug!("Aggregation already in progress, ignoring start");
                return false;
            }
            let previous = std::mem::replace(&mut inner.state, AggregationState::Loading);
            LoadingGuard {
                inner: &self.inner,
                previous: Some(previous),
            }
        };

        let outcome = self.drain().await;
        guard.disarm();

        let mut inner = self.write();
        match outcome {
            Ok(records) => {
                tracing::info!("Aggregated {} records", records.len());
                inner.snapshot = Arc::new(records);
                inner.state = AggregationState::Ready;
            }
            Err(e) => {
                tracing::error!("Aggregation failed: {}", e);
                inner.snapshot = Arc::new(Vec::new());
                inner.state = AggregationState::Failed(format!(
                    "Failed to fetch the complete collection: {e}"
                ));
            }
        }
        true
    }

    /// Follow `next` links from page 1 until the source is exhausted.
    async fn drain(&self) -> Result<Vec<Character>> {
        let mut records = Vec::new();
        let mut request = Some(PageRequest::first());
        let mut pages = 0u32;
        let mut reported_count = None;

        while let Some(current) = request {
            if pages >= self.max_pages {
                return Err(PipelineError::PageLimit {
                    max_pages: self.max_pages,
                });
            }

            let page = self.source.fetch_page(&current).await?;
            pages += 1;
            tracing::debug!(
                "Fetched page {} with {} records ({} of {} so far)",
                pages,
                page.results.len(),
                records.len() + page.results.len(),
                page.count
            );

            reported_count = Some(page.count);
            records.extend(page.results);
            request = page.next.map(PageRequest::Link);
        }

        if let Some(count) = reported_count {
            if count != records.len() {
                tracing::warn!(
                    "Source reported {} records but {} were aggregated",
                    count,
                    records.len()
                );
            }
        }

        Ok(records)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AggregationState {
        self.read().state.clone()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().state.is_loading()
    }

    /// The failure message of the last attempt, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().state.error().map(str::to_string)
    }

    /// The current snapshot. Empty until an aggregation succeeds.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Character>> {
        Arc::clone(&self.read().snapshot)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
