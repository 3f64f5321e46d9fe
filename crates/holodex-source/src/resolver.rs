//! Reference URL to display name resolution.

use crate::client::SwapiClient;
use async_trait::async_trait;
use serde::Deserialize;

/// Label returned when a reference cannot be resolved.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Resolves a reference URL to a human-readable name.
///
/// Resolution never fails: any transport, status, or parse problem
/// degrades to [`UNKNOWN_LABEL`].
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    /// Resolve the `name` of the resource at `reference_url`.
    async fn resolve_name(&self, reference_url: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[async_trait]
impl ReferenceResolver for SwapiClient {
    async fn resolve_name(&self, reference_url: &str) -> String {
        match self.get_json::<NamedResource>(reference_url).await {
            Ok(resource) => resource.name,
            Err(e) => {
                tracing::debug!("Falling back to {} for {}: {}", UNKNOWN_LABEL, reference_url, e);
                UNKNOWN_LABEL.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_reference_is_unknown() {
        let client = SwapiClient::with_base_url("http://127.0.0.1:1/api").expect("create client");
        let name = client.resolve_name("http://127.0.0.1:1/api/species/3/").await;
        assert_eq!(name, UNKNOWN_LABEL);
    }

    #[tokio::test]
    async fn test_malformed_reference_is_unknown() {
        let client = SwapiClient::with_base_url("http://127.0.0.1:1/api").expect("create client");
        assert_eq!(client.resolve_name("not a url").await, UNKNOWN_LABEL);
        assert_eq!(client.resolve_name("").await, UNKNOWN_LABEL);
    }
}
