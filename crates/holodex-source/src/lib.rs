//! Holodex Source - Remote API access for the character directory.
//!
//! This crate wraps the paginated people collection and the reference
//! lookups used to label records.
//!
//! # Features
//!
//! - **Paginated fetch**: one page per call, following `next` links
//! - **Reference resolution**: URL to display name with an `"Unknown"` fallback
//! - **Trait seams**: [`PageSource`] and [`ReferenceResolver`] so the
//!   pipeline can run against in-memory fakes
//!
//! # Example
//!
//! ```rust,no_run
//! use holodex_core::ApiConfig;
//! use holodex_source::{PageRequest, PageSource, ReferenceResolver, SwapiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SwapiClient::new(&ApiConfig::default())?;
//!
//! let page = client.fetch_page(&PageRequest::first()).await?;
//! println!("{} characters in total", page.count);
//!
//! let species = client.resolve_name("https://swapi.dev/api/species/2/").await;
//! println!("species: {species}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod resolver;

// Re-export commonly used types
pub use client::{PageRequest, PageSource, SwapiClient};
pub use error::{Result, SourceError};
pub use resolver::{ReferenceResolver, UNKNOWN_LABEL};
