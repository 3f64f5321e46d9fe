//! Application state management.

use holodex_auth::{AuthSession, Credentials};
use holodex_core::{AppConfig, Planet};
use holodex_pipeline::{DatasetAggregator, DirectoryView, EnrichmentPipeline};
use holodex_source::SwapiClient;
use std::sync::Arc;

/// Everything one run of the shell works with.
pub struct AppState {
    /// Effective configuration
    pub config: AppConfig,

    /// Shared HTTP client; serves pages, references and planets
    pub client: Arc<SwapiClient>,

    /// Login session, shared with the token refresh task
    pub session: Arc<AuthSession>,

    /// Owner of the dataset snapshot
    pub aggregator: DatasetAggregator,

    /// Species label resolution for the visible page
    pub enrichment: EnrichmentPipeline,

    /// Filter and paging state over the snapshot
    pub view: DirectoryView,
}

impl AppState {
    /// Wire up the collaborators described by `config`.
    pub fn new(config: AppConfig) -> holodex_source::Result<Self> {
        let client = Arc::new(SwapiClient::new(&config.api)?);
        tracing::info!("Using collection {}", client.page_url(1));

        let aggregator =
            DatasetAggregator::new(client.clone()).with_max_pages(config.api.max_pages);
        let enrichment = EnrichmentPipeline::from_config(client.clone(), &config.enrichment);
        let session = Arc::new(AuthSession::new(Credentials::from_config(&config.auth)));
        let view = DirectoryView::from_config(&config.listing);

        Ok(Self {
            config,
            client,
            session,
            aggregator,
            enrichment,
            view,
        })
    }

    /// Aggregate the collection and point the view at the result.
    pub async fn load_directory(&mut self) {
        self.aggregator.start().await;
        self.view.set_snapshot(self.aggregator.snapshot());
    }

    /// Enrich the visible page and store the labels if it is still current.
    pub async fn enrich_visible_page(&mut self) -> bool {
        let ticket = self.view.begin_enrichment();
        let enriched = self.enrichment.enrich(ticket.records()).await;
        self.view.apply_enrichment(&ticket, enriched)
    }

    /// Homeworld details, or `None` if they could not be fetched.
    pub async fn homeworld(&self, url: &str) -> Option<Planet> {
        match self.client.fetch_planet(url).await {
            Ok(planet) => Some(planet),
            Err(e) => {
                tracing::warn!("Failed to fetch homeworld {}: {}", url, e);
                None
            }
        }
    }
}
