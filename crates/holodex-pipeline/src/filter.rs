#![allow(clippy::must_use_candidate)]

use holodex_core::{Character, FacetField};
use serde::{Deserialize, Serialize};

/// Search term plus one selected reference per facet.
///
/// An empty string leaves that dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub species_url: String,
    pub homeworld_url: String,
    pub film_url: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn with_facet(mut self, field: FacetField, url: impl Into<String>) -> Self {
        self.set_facet(field, url);
        self
    }

    pub fn set_facet(&mut self, field: FacetField, url: impl Into<String>) {
        let url = url.into();
        match field {
            FacetField::Species => self.species_url = url,
            FacetField::Homeworld => self.homeworld_url = url,
            FacetField::Films => self.film_url = url,
        }
    }

    pub fn facet(&self, field: FacetField) -> &str {
        match field {
            FacetField::Species => &self.species_url,
            FacetField::Homeworld => &self.homeworld_url,
            FacetField::Films => &self.film_url,
        }
    }

    /// True when any search term or facet selection is set.
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty()
            || !self.species_url.is_empty()
            || !self.homeworld_url.is_empty()
            || !self.film_url.is_empty()
    }

    pub fn matches(&self, character: &Character) -> bool {
        self.matches_lowercased(&self.search_term.to_lowercase(), character)
    }

    // Predicates run cheapest first; all of them must hold.
    fn matches_lowercased(&self, needle: &str, character: &Character) -> bool {
        if !needle.is_empty() && !character.name.to_lowercase().contains(needle) {
            return false;
        }

        // Substring-tolerant so partial species URLs still match.
        if !self.species_url.is_empty()
            && !character
                .species
                .iter()
                .any(|url| url.contains(self.species_url.as_str()))
        {
            return false;
        }

        if !self.homeworld_url.is_empty() && character.homeworld != self.homeworld_url {
            return false;
        }

        if !self.film_url.is_empty() && !character.films.iter().any(|url| *url == self.film_url) {
            return false;
        }

        true
    }
}

/// Records of `snapshot` that satisfy `criteria`, in snapshot order.
pub fn apply_filters(snapshot: &[Character], criteria: &FilterCriteria) -> Vec<Character> {
    if !criteria.is_active() {
        return snapshot.to_vec();
    }

    let needle = criteria.search_term.to_lowercase();
    snapshot
        .iter()
        .filter(|character| criteria.matches_lowercased(&needle, character))
        .cloned()
        .collect()
}
