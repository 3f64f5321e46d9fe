//! Facet extraction over a dataset snapshot.

use holodex_core::{reference_id, Character, FacetField};
use std::collections::HashSet;

/// Ordered mapping from reference URL to display label.
///
/// Keys are unique and kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetMap {
    entries: Vec<(String, String)>,
}

impl FacetMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for `url`, if present.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == url)
            .map(|(_, label)| label.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(url, label)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, label)| (key.as_str(), label.as_str()))
    }
}

/// Placeholder label built from a reference URL, e.g. `"Species 2"`.
#[must_use]
pub fn synthetic_label(field: FacetField, url: &str) -> String {
    format!("{} {}", field.label_prefix(), reference_id(url))
}

/// Collect every distinct reference of `field` across the snapshot.
///
/// The first occurrence in snapshot order wins, so repeated calls over the
/// same snapshot always produce the same map.
#[must_use]
pub fn extract_facets(snapshot: &[Character], field: FacetField) -> FacetMap {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for character in snapshot {
        for url in field.references(character) {
            if seen.insert(url) {
                entries.push((url.to_string(), synthetic_label(field, url)));
            }
        }
    }

    FacetMap { entries }
}

/// Species facet, the category dimension of the directory.
#[must_use]
pub fn extract_category_facets(snapshot: &[Character]) -> FacetMap {
    extract_facets(snapshot, FacetField::Species)
}
