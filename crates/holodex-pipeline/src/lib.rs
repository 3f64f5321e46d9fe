//! Holodex Pipeline - Dataset aggregation and the directory view
//!
//! Turns a paginated remote collection into a browsable, filterable,
//! locally paginated directory.
//!
//! # Features
//!
//! - **Aggregation**: drains every page of the source into one snapshot
//! - **Facets**: distinct species, homeworld and film references
//! - **Filtering**: name search plus facet selection, all combined with AND
//! - **Local paging**: fixed-size windows over the filtered view
//! - **Enrichment**: concurrent species label resolution for the visible page
//!
//! # Example
//!
//! ```no_run
//! use holodex_pipeline::{DatasetAggregator, DirectoryView, EnrichmentPipeline};
//! use holodex_source::SwapiClient;
//! use holodex_core::ApiConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> holodex_source::Result<()> {
//! let client = Arc::new(SwapiClient::new(&ApiConfig::default())?);
//! let aggregator = DatasetAggregator::new(client.clone());
//! aggregator.start().await;
//!
//! let mut view = DirectoryView::default();
//! view.set_snapshot(aggregator.snapshot());
//! view.set_search_term("sky");
//!
//! let ticket = view.begin_enrichment();
//! let enriched = EnrichmentPipeline::new(client).enrich(ticket.records()).await;
//! view.apply_enrichment(&ticket, enriched);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregator;
pub mod enrichment;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod facets;
#[allow(missing_docs)]
pub mod filter;
pub mod memo;
pub mod paginator;
pub mod view;

// Re-export commonly used types
pub use aggregator::{AggregationState, DatasetAggregator, DEFAULT_MAX_PAGES};
pub use enrichment::{EnrichmentPipeline, DEFAULT_LABEL};
pub use error::{PipelineError, Result};
pub use facets::{extract_category_facets, extract_facets, synthetic_label, FacetMap};
pub use filter::{apply_filters, FilterCriteria};
pub use paginator::{clamp_page, total_pages, PageWindow, DEFAULT_PAGE_SIZE};
pub use view::{DirectoryView, DisplayState, EnrichmentTicket};
