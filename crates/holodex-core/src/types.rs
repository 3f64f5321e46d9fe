//! Shared types used across the Holodex application.
//!
//! The wire records mirror the SWAPI JSON shapes one-to-one. Numeric
//! attributes stay as text because the API reports values such as
//! `"unknown"` or `"1,358"`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A character record from the people collection.
///
/// `url` uniquely identifies the record within a dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name
    pub name: String,
    /// Height in centimetres, as reported
    #[serde(default)]
    pub height: String,
    /// Mass in kilograms, as reported
    #[serde(default)]
    pub mass: String,
    /// Hair colour
    #[serde(default)]
    pub hair_color: String,
    /// Skin colour
    #[serde(default)]
    pub skin_color: String,
    /// Eye colour
    #[serde(default)]
    pub eye_color: String,
    /// Birth year in BBY/ABY notation
    #[serde(default)]
    pub birth_year: String,
    /// Gender
    #[serde(default)]
    pub gender: String,
    /// Reference to the home planet resource
    #[serde(default)]
    pub homeworld: String,
    /// References to film resources
    #[serde(default)]
    pub films: Vec<String>,
    /// References to species resources; empty for most humans
    #[serde(default)]
    pub species: Vec<String>,
    /// ISO-8601 creation timestamp
    #[serde(default)]
    pub created: String,
    /// Identifying URL of this record
    pub url: String,
}

/// Planet details used by the character detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Planet name
    pub name: String,
    /// Terrain description
    #[serde(default)]
    pub terrain: String,
    /// Climate description
    #[serde(default)]
    pub climate: String,
    /// Population, as reported
    #[serde(default)]
    pub population: String,
}

/// One page of a paginated collection response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of records in the collection
    pub count: usize,
    /// Link to the next page, `None` on the last page
    pub next: Option<String>,
    /// Link to the previous page, `None` on the first page
    pub previous: Option<String>,
    /// Records on this page
    pub results: Vec<T>,
}

/// A character paired with its resolved category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedCharacter {
    /// The underlying record
    #[serde(flatten)]
    pub character: Character,
    /// Resolved species name, or a default/fallback label
    pub species_name: String,
}

impl EnrichedCharacter {
    /// Pair a character with a label.
    #[must_use]
    pub fn new(character: Character, species_name: impl Into<String>) -> Self {
        Self {
            character,
            species_name: species_name.into(),
        }
    }
}

/// Cross-reference fields that can be faceted and filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetField {
    /// `species` references (the category facet)
    Species,
    /// `homeworld` reference
    Homeworld,
    /// `films` references (the collection facet)
    Films,
}

impl FacetField {
    /// Noun used in synthetic facet labels.
    #[must_use]
    pub fn label_prefix(self) -> &'static str {
        match self {
            FacetField::Species => "Species",
            FacetField::Homeworld => "Planet",
            FacetField::Films => "Film",
        }
    }

    /// References held by `character` for this field, in record order.
    #[must_use]
    pub fn references(self, character: &Character) -> Vec<&str> {
        match self {
            FacetField::Species => character.species.iter().map(String::as_str).collect(),
            FacetField::Films => character.films.iter().map(String::as_str).collect(),
            FacetField::Homeworld if character.homeworld.is_empty() => Vec::new(),
            FacetField::Homeworld => vec![character.homeworld.as_str()],
        }
    }
}

impl fmt::Display for FacetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label_prefix())
    }
}

/// Extract the opaque id segment of a reference URL.
///
/// This is the second-to-last `/`-separated segment, which for the
/// trailing-slash form `https://swapi.dev/api/species/2/` is `"2"`.
/// Returns an empty string when the URL has fewer than two segments.
#[must_use]
pub fn reference_id(url: &str) -> &str {
    let mut segments = url.rsplit('/');
    segments.next();
    segments.next().unwrap_or("")
}
