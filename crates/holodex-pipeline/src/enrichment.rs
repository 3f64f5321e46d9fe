//! Category label enrichment for the displayed page.
//!
//! Every record on the page gets its first species reference resolved
//! concurrently. The batch settles only when all lookups have finished or
//! fallen back, and always yields one enriched record per input record in
//! input order.

use crate::error::{PipelineError, Result};
use futures::future::join_all;
use holodex_core::{Character, EnrichedCharacter, EnrichmentConfig};
use holodex_source::{ReferenceResolver, UNKNOWN_LABEL};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Label for records without a species reference.
pub const DEFAULT_LABEL: &str = "Human";

/// Default bound on a single lookup.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves species labels for a page of records.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    resolver: Arc<dyn ReferenceResolver>,
    resolve_timeout: Duration,
    default_label: String,
    fallback_label: String,
    runtime: Option<Handle>,
}

impl EnrichmentPipeline {
    /// Create a pipeline with default labels and timeout.
    #[must_use]
    pub fn new(resolver: Arc<dyn ReferenceResolver>) -> Self {
        Self {
            resolver,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            default_label: DEFAULT_LABEL.to_string(),
            fallback_label: UNKNOWN_LABEL.to_string(),
            runtime: None,
        }
    }

    /// Create a pipeline from enrichment settings.
    #[must_use]
    pub fn from_config(resolver: Arc<dyn ReferenceResolver>, config: &EnrichmentConfig) -> Self {
        Self {
            resolver,
            resolve_timeout: config.resolve_timeout(),
            default_label: config.default_label.clone(),
            fallback_label: config.fallback_label.clone(),
            runtime: None,
        }
    }

    /// Set the per-lookup timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    /// Run lookups on `runtime` instead of the caller's runtime.
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Label every record on `window`.
    ///
    /// Never fails: individual lookups degrade to the fallback label, and
    /// if the join barrier itself breaks the whole page is labelled with it.
    pub async fn enrich(&self, window: &[Character]) -> Vec<EnrichedCharacter> {
        match self.try_enrich(window).await {
            Ok(enriched) => enriched,
            Err(e) => {
                tracing::error!(
                    "Failed to enrich {} records with species names: {}",
                    window.len(),
                    e
                );
                self.fallback_all(window)
            }
        }
    }

    /// Spawn one lookup per record and wait for all of them.
    async fn try_enrich(&self, window: &[Character]) -> Result<Vec<EnrichedCharacter>> {
        let tasks: Vec<_> = window
            .iter()
            .map(|character| {
                character.species.first().map(|url| {
                    let resolver = Arc::clone(&self.resolver);
                    let url = url.clone();
                    let timeout = self.resolve_timeout;
                    let fallback = self.fallback_label.clone();
                    let lookup = async move {
                        match tokio::time::timeout(timeout, resolver.resolve_name(&url)).await {
                            Ok(name) => name,
                            Err(_) => {
                                tracing::warn!("Resolving {} timed out after {:?}", url, timeout);
                                fallback
                            }
                        }
                    };
                    match &self.runtime {
                        Some(runtime) => runtime.spawn(lookup),
                        None => tokio::spawn(lookup),
                    }
                })
            })
            .collect();

        let settled = join_all(tasks.into_iter().map(|task| async move {
            match task {
                Some(handle) => Some(handle.await),
                None => None,
            }
        }))
        .await;

        let mut enriched = Vec::with_capacity(window.len());
        for (character, outcome) in window.iter().zip(settled) {
            let label = match outcome {
                None => self.default_label.clone(),
                Some(Ok(name)) => name,
                Some(Err(e)) if e.is_cancelled() => {
                    return Err(PipelineError::Join(e.to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("Species lookup for {} panicked: {}", character.url, e);
                    self.fallback_label.clone()
                }
            };
            enriched.push(EnrichedCharacter::new(character.clone(), label));
        }

        Ok(enriched)
    }

    /// One fallback-labelled record per input record.
    pub(crate) fn fallback_all(&self, window: &[Character]) -> Vec<EnrichedCharacter> {
        window
            .iter()
            .map(|character| EnrichedCharacter::new(character.clone(), self.fallback_label.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    const DROID: &str = "https://swapi.dev/api/species/2/";
    const WOOKIEE: &str = "https://swapi.dev/api/species/3/";
    const BROKEN: &str = "https://swapi.dev/api/species/404/";
    const SLOW: &str = "https://swapi.dev/api/species/999/";
    const PANICS: &str = "https://swapi.dev/api/species/500/";

    struct FakeResolver {
        names: HashMap<&'static str, &'static str>,
    }

    impl FakeResolver {
        fn new() -> Self {
            Self {
                names: HashMap::from([(DROID, "Droid"), (WOOKIEE, "Wookiee")]),
            }
        }
    }

    #[async_trait]
    impl ReferenceResolver for FakeResolver {
        async fn resolve_name(&self, reference_url: &str) -> String {
            if reference_url == SLOW {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            assert_ne!(reference_url, PANICS, "resolver blew up");
            self.names
                .get(reference_url)
                .map_or_else(|| UNKNOWN_LABEL.to_string(), |name| (*name).to_string())
        }
    }

    fn character(name: &str, species: &[&str]) -> Character {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "species": species,
            "url": format!("https://swapi.dev/api/people/{name}/"),
        }))
        .expect("valid character")
    }

    fn labels(enriched: &[EnrichedCharacter]) -> Vec<&str> {
        enriched.iter().map(|e| e.species_name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_labels_preserve_input_order() {
        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()));
        let window = vec![
            character("luke", &[]),
            character("r2", &[DROID]),
            character("chewie", &[WOOKIEE, DROID]),
        ];

        let enriched = pipeline.enrich(&window).await;

        assert_eq!(labels(&enriched), vec!["Human", "Droid", "Wookiee"]);
        assert_eq!(enriched[1].character, window[1]);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_unknown() {
        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()));
        let window = vec![character("ghost", &[BROKEN]), character("luke", &[])];

        let enriched = pipeline.enrich(&window).await;

        assert_eq!(enriched.len(), 2);
        assert_eq!(labels(&enriched), vec!["Unknown", "Human"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_times_out_to_unknown() {
        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()))
            .with_timeout(Duration::from_secs(5));
        let window = vec![character("slow", &[SLOW]), character("r2", &[DROID])];

        let enriched = pipeline.enrich(&window).await;

        assert_eq!(labels(&enriched), vec!["Unknown", "Droid"]);
    }

    #[tokio::test]
    async fn test_panicking_lookup_only_affects_its_record() {
        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()));
        let window = vec![character("boom", &[PANICS]), character("r2", &[DROID])];

        let enriched = pipeline.enrich(&window).await;

        assert_eq!(labels(&enriched), vec!["Unknown", "Droid"]);
    }

    #[tokio::test]
    async fn test_empty_window() {
        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()));
        assert!(pipeline.enrich(&[]).await.is_empty());
    }

    #[test]
    fn test_cancelled_lookups_fall_back_for_whole_page() {
        let workers = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build worker runtime");
        let driver = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build driver runtime");

        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()))
            .with_runtime(workers.handle().clone());
        let window = vec![
            character("r2", &[DROID]),
            character("luke", &[]),
            character("chewie", &[WOOKIEE]),
        ];

        let enriched = driver.block_on(async move {
            let pending = tokio::spawn(async move { pipeline.enrich(&window).await });
            for _ in 0..3 {
                tokio::task::yield_now().await;
            }
            // Lookups queued on the worker runtime never run; shutting it
            // down cancels them under the join barrier.
            workers.shutdown_background();
            pending.await.expect("enrichment task completes")
        });

        assert_eq!(enriched.len(), 3);
        assert_eq!(labels(&enriched), vec!["Unknown", "Unknown", "Unknown"]);
        assert_eq!(enriched[1].character.name, "luke");
    }

    #[test]
    fn test_fallback_all_keeps_one_record_per_input() {
        let pipeline = EnrichmentPipeline::new(Arc::new(FakeResolver::new()));
        let window = vec![character("luke", &[]), character("r2", &[DROID])];

        let fallback = pipeline.fallback_all(&window);
        assert_eq!(labels(&fallback), vec!["Unknown", "Unknown"]);
    }

    #[test]
    fn test_from_config_labels() {
        let config = EnrichmentConfig {
            resolve_timeout_secs: 2,
            default_label: "Organic".to_string(),
            fallback_label: "???".to_string(),
        };
        let pipeline = EnrichmentPipeline::from_config(Arc::new(FakeResolver::new()), &config);
        assert_eq!(pipeline.resolve_timeout, Duration::from_secs(2));
        assert_eq!(pipeline.default_label, "Organic");
        assert_eq!(pipeline.fallback_label, "???");
    }
}
