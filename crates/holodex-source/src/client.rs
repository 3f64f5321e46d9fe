//! Paginated collection client.
//!
//! The [`PageSource`] trait is the seam the dataset aggregator drains;
//! [`SwapiClient`] is the reqwest-backed implementation.

use crate::error::{Result, SourceError};
use async_trait::async_trait;
use holodex_core::{ApiConfig, Character, Page, Planet};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Which page to fetch.
///
/// Aggregation starts from a page number and then follows the `next`
/// links the API hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// 1-based page number
    Number(u32),
    /// A `next` link returned by the previous page
    Link(String),
}

impl PageRequest {
    /// The first page of a collection.
    #[must_use]
    pub fn first() -> Self {
        PageRequest::Number(1)
    }
}

/// A source of paginated character records.
///
/// Implementations must be thread-safe (Send + Sync) for use in async contexts.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a body
    /// that is not a page of records. No retries are attempted.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<Character>>;
}

/// HTTP client for a SWAPI-shaped API.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: Client,
    base_url: String,
    /// `base_url` with a trailing slash, for joining relative references
    base: Url,
    collection: String,
}

impl SwapiClient {
    /// Create a client from API settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created or the base URL is empty.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SourceError::InvalidUrl(config.base_url.clone()));
        }
        let base = Url::parse(&format!("{base_url}/"))
            .map_err(|e| SourceError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            base,
            collection: config.collection.trim_matches('/').to_string(),
        })
    }

    /// Create a client with default settings against another base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    /// URL of a numbered collection page.
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        format!("{}/{}/?page={page}", self.base_url, self.collection)
    }

    /// Resolve a request to the URL it targets.
    #[must_use]
    pub fn request_url(&self, request: &PageRequest) -> String {
        match request {
            PageRequest::Number(page) => self.page_url(*page),
            PageRequest::Link(link) => link.clone(),
        }
    }

    /// Absolute form of a reference URL.
    ///
    /// References may be absolute or relative; relative ones are joined onto
    /// the base URL, so `/api/species/2/` keeps only the base origin.
    pub fn absolute_url(&self, reference: &str) -> Result<Url> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(SourceError::InvalidUrl(reference.to_string()));
        }
        match Url::parse(reference) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base
                .join(reference)
                .map_err(|e| SourceError::InvalidUrl(format!("{reference}: {e}"))),
        }
    }

    /// Fetch the planet a character's `homeworld` points at.
    pub async fn fetch_planet(&self, url: &str) -> Result<Planet> {
        self.get_json(url).await
    }

    /// GET `url` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let target = self.absolute_url(url)?;
        let response = self.client.get(target).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| SourceError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PageSource for SwapiClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page<Character>> {
        let url = self.request_url(request);
        tracing::debug!("Fetching page {}", url);
        self.get_json(&url).await
    }
}
