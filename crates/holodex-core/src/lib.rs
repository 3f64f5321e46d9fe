//! Holodex Core - Foundation crate for the Holodex character directory.
//!
//! This crate provides the shared data model, error handling, configuration
//! management, and display formatting helpers that the other Holodex crates
//! depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Wire records (`Character`, `Planet`, `Page`) and derived types
//! - [`format`] - Presentation helpers (dates, units, category colours)
//!
//! # Example
//!
//! ```rust
//! use holodex_core::{AppConfig, Character};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.listing.page_size, 10);
//!
//! let luke: Character = serde_json::from_str(
//!     r#"{"name": "Luke Skywalker", "url": "https://swapi.dev/api/people/1/"}"#,
//! )?;
//! assert!(luke.species.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod format;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, AuthConfig, EnrichmentConfig, ListingConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{reference_id, Character, EnrichedCharacter, FacetField, Page, Planet};
