//! Command-line arguments.

use clap::Parser;
use holodex_core::FacetField;
use std::path::PathBuf;

/// Browse, search and filter the Star Wars character directory.
#[derive(Debug, Parser)]
#[command(name = "holodex")]
#[command(about = "Browse, search and filter the Star Wars character directory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Login username (defaults to the configured account)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Login password (defaults to the configured account)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Species filter: a species URL or its numeric id
    #[arg(long)]
    pub species: Option<String>,

    /// Homeworld filter: a planet URL or its numeric id
    #[arg(long)]
    pub homeworld: Option<String>,

    /// Film filter: a film URL or its numeric id
    #[arg(long)]
    pub film: Option<String>,

    /// Page of the filtered directory to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Show details for the n-th record on the page (1-based)
    #[arg(short, long)]
    pub details: Option<usize>,

    /// List the species present in the directory and exit
    #[arg(long)]
    pub list_species: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Facet selections given on the command line, expanded to reference URLs.
    pub fn facet_filters(&self, base_url: &str) -> Vec<(FacetField, String)> {
        [
            (FacetField::Species, self.species.as_deref()),
            (FacetField::Homeworld, self.homeworld.as_deref()),
            (FacetField::Films, self.film.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, reference_url(base_url, field, value))))
        .collect()
    }
}

/// Expand a bare numeric id into a reference URL; anything else is used as given.
pub fn reference_url(base_url: &str, field: FacetField, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return value.to_string();
    }
    let collection = match field {
        FacetField::Species => "species",
        FacetField::Homeworld => "planets",
        FacetField::Films => "films",
    };
    format!("{}/{}/{}/", base_url.trim_end_matches('/'), collection, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://swapi.dev/api";

    #[test]
    fn test_numeric_id_expands_to_url() {
        assert_eq!(
            reference_url(BASE, FacetField::Species, "2"),
            "https://swapi.dev/api/species/2/"
        );
        assert_eq!(
            reference_url("https://swapi.dev/api/", FacetField::Homeworld, "1"),
            "https://swapi.dev/api/planets/1/"
        );
    }

    #[test]
    fn test_url_is_kept() {
        assert_eq!(
            reference_url(BASE, FacetField::Films, "https://swapi.dev/api/films/4/"),
            "https://swapi.dev/api/films/4/"
        );
    }

    #[test]
    fn test_parse_filters() {
        let cli = Cli::try_parse_from([
            "holodex", "--search", "sky", "--species", "3", "--film", "1", "--page", "2",
        ])
        .expect("valid arguments");

        assert_eq!(cli.search, "sky");
        assert_eq!(cli.page, 2);
        assert_eq!(
            cli.facet_filters(BASE),
            vec![
                (FacetField::Species, "https://swapi.dev/api/species/3/".to_string()),
                (FacetField::Films, "https://swapi.dev/api/films/1/".to_string()),
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["holodex"]).expect("valid arguments");
        assert_eq!(cli.page, 1);
        assert!(cli.details.is_none());
        assert!(!cli.list_species);
        assert!(cli.facet_filters(BASE).is_empty());
    }
}
