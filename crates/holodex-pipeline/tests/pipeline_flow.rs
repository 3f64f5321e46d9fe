use async_trait::async_trait;
use holodex_core::{Character, FacetField, Page};
use holodex_pipeline::{
    AggregationState, DatasetAggregator, DirectoryView, DisplayState, EnrichmentPipeline,
};
use holodex_source::{PageRequest, PageSource, ReferenceResolver, UNKNOWN_LABEL};
use std::sync::Arc;

const DROID: &str = "https://swapi.dev/api/species/2/";
const WOOKIEE: &str = "https://swapi.dev/api/species/3/";
const TATOOINE: &str = "https://swapi.dev/api/planets/1/";
const KASHYYYK: &str = "https://swapi.dev/api/planets/14/";
const NEW_HOPE: &str = "https://swapi.dev/api/films/1/";

fn character(id: usize) -> Character {
    let (species, homeworld): (Vec<&str>, &str) = match id % 4 {
        0 => (vec![DROID], TATOOINE),
        1 => (vec![WOOKIEE], KASHYYYK),
        _ => (vec![], TATOOINE),
    };
    let films: Vec<&str> = if id < 12 { vec![NEW_HOPE] } else { vec![] };
    serde_json::from_value(serde_json::json!({
        "name": format!("Character {id}"),
        "species": species,
        "homeworld": homeworld,
        "films": films,
        "url": format!("https://swapi.dev/api/people/{id}/"),
    }))
    .expect("valid character")
}

/// Four pages of ten records linked through `next`.
struct InMemorySource;

#[async_trait]
impl PageSource for InMemorySource {
    async fn fetch_page(&self, request: &PageRequest) -> holodex_source::Result<Page<Character>> {
        let number: usize = match request {
            PageRequest::Number(n) => *n as usize,
            PageRequest::Link(link) => link
                .rsplit('=')
                .next()
                .and_then(|n| n.parse().ok())
                .expect("numbered link"),
        };
        let start = (number - 1) * 10;
        Ok(Page {
            count: 40,
            next: (number < 4).then(|| format!("https://swapi.dev/api/people/?page={}", number + 1)),
            previous: None,
            results: (start..start + 10).map(character).collect(),
        })
    }
}

struct InMemoryResolver;

#[async_trait]
impl ReferenceResolver for InMemoryResolver {
    async fn resolve_name(&self, reference_url: &str) -> String {
        match reference_url {
            DROID => "Droid".to_string(),
            WOOKIEE => "Wookiee".to_string(),
            _ => UNKNOWN_LABEL.to_string(),
        }
    }
}

async fn loaded() -> (DatasetAggregator, DirectoryView) {
    let aggregator = DatasetAggregator::new(Arc::new(InMemorySource));
    aggregator.start().await;
    assert_eq!(aggregator.state(), AggregationState::Ready);

    let mut view = DirectoryView::new(10);
    view.set_snapshot(aggregator.snapshot());
    (aggregator, view)
}

#[tokio::test]
async fn test_aggregate_filter_page_and_enrich() {
    let (aggregator, mut view) = loaded().await;
    let pipeline = EnrichmentPipeline::new(Arc::new(InMemoryResolver));

    assert_eq!(view.filtered().len(), 40);
    assert_eq!(view.total_pages(), 4);
    assert_eq!(view.facets(FacetField::Species).len(), 2);
    assert_eq!(view.facets(FacetField::Homeworld).len(), 2);

    view.set_facet(FacetField::Homeworld, TATOOINE);
    view.set_facet(FacetField::Films, NEW_HOPE);
    // ids below 12 that are not 1 mod 4
    assert_eq!(view.filtered().len(), 9);

    let ticket = view.begin_enrichment();
    let enriched = pipeline.enrich(ticket.records()).await;
    assert!(view.apply_enrichment(&ticket, enriched));

    match view.display_state(true, &aggregator.state()) {
        DisplayState::Page {
            records,
            current_page,
            total_pages,
        } => {
            assert_eq!(current_page, 1);
            assert_eq!(total_pages, 1);
            assert_eq!(records.len(), 9);
            assert_eq!(records[0].character.name, "Character 0");
            assert_eq!(records[0].species_name, "Droid");
            assert_eq!(records[1].species_name, "Human");
        }
        other => panic!("expected a page, got {other:?}"),
    }
}

#[tokio::test]
async fn test_shrinking_filter_never_leaves_an_empty_page() {
    let (_aggregator, mut view) = loaded().await;
    assert_eq!(view.set_page(4), 4);

    view.set_facet(FacetField::Species, WOOKIEE);

    assert_eq!(view.current_page(), 1);
    assert_eq!(view.total_pages(), 1);
    assert_eq!(view.page_window().records.len(), 10);
}

#[tokio::test]
async fn test_enrichment_for_previous_page_is_discarded() {
    let (aggregator, mut view) = loaded().await;
    let pipeline = EnrichmentPipeline::new(Arc::new(InMemoryResolver));

    let first = view.begin_enrichment();
    view.set_page(2);
    let second = view.begin_enrichment();

    let (stale, fresh) = tokio::join!(
        pipeline.enrich(first.records()),
        pipeline.enrich(second.records())
    );

    assert!(view.apply_enrichment(&second, fresh));
    assert!(!view.apply_enrichment(&first, stale));

    match view.display_state(true, &aggregator.state()) {
        DisplayState::Page { records, .. } => {
            assert_eq!(records[0].character.name, "Character 10");
        }
        other => panic!("expected a page, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_restricted_even_when_ready() {
    let (aggregator, mut view) = loaded().await;
    assert_eq!(
        view.display_state(false, &aggregator.state()),
        DisplayState::Restricted
    );
}
