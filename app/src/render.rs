//! Plain-text rendering of display states and details.

use holodex_core::format::{category_color, cm_to_meters, format_date};
use holodex_core::{EnrichedCharacter, Planet};
use holodex_pipeline::{DisplayState, FacetMap};
use holodex_source::UNKNOWN_LABEL;
use std::fmt::Write;

/// Wrap `label` in the ANSI colour for its species.
pub fn badge(label: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", category_color(label), label)
}

/// Render what the shell should show for `state`.
pub fn render_state(state: &DisplayState) -> String {
    match state {
        DisplayState::Restricted => "Please log in to browse the character directory.".to_string(),
        DisplayState::Loading => "Loading characters...".to_string(),
        DisplayState::Failed(message) => format!("Error: {message}"),
        DisplayState::Empty { filters_active } => {
            if *filters_active {
                "No characters match the current filters. Clear the search and filters to see everyone."
                    .to_string()
            } else {
                "No characters found.".to_string()
            }
        }
        DisplayState::Enriching => "Resolving species...".to_string(),
        DisplayState::Page {
            records,
            current_page,
            total_pages,
        } => render_page(records, *current_page, *total_pages),
    }
}

fn render_page(records: &[EnrichedCharacter], current_page: usize, total_pages: usize) -> String {
    let mut out = String::new();
    for (index, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<28} {}",
            index + 1,
            record.character.name,
            badge(&record.species_name)
        );
    }
    let _ = write!(out, "Page {current_page} of {total_pages}");
    out
}

/// Render facet entries as `label  url` lines.
pub fn render_facets(facets: &FacetMap) -> String {
    facets
        .iter()
        .map(|(url, label)| format!("{label:<12} {url}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the detail view for one record. `planet` is `None` when the
/// homeworld lookup failed.
pub fn render_details(record: &EnrichedCharacter, planet: Option<&Planet>) -> String {
    let character = &record.character;
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", character.name, badge(&record.species_name));
    let _ = writeln!(out, "  Height:     {}", cm_to_meters(&character.height));
    let _ = writeln!(out, "  Mass:       {} kg", character.mass);
    let _ = writeln!(out, "  Birth year: {}", character.birth_year);
    let _ = writeln!(out, "  Films:      {}", character.films.len());
    let _ = writeln!(out, "  Added:      {}", format_date(&character.created));
    match planet {
        Some(planet) => {
            let _ = writeln!(out, "  Homeworld:  {}", planet.name);
            let _ = writeln!(out, "    Terrain:    {}", planet.terrain);
            let _ = writeln!(out, "    Climate:    {}", planet.climate);
            let _ = write!(out, "    Population: {}", planet.population);
        }
        None => {
            let _ = write!(out, "  Homeworld:  {UNKNOWN_LABEL}");
        }
    }
    out
}
