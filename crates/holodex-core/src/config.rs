//! Configuration management for Holodex.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/holodex/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API settings
    pub api: ApiConfig,
    /// Local pagination settings
    pub listing: ListingConfig,
    /// Category label enrichment settings
    pub enrichment: EnrichmentConfig,
    /// Mock authentication settings
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults
    /// if the file does not exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `HOLODEX_BASE_URL`: Override the API base URL
    /// - `HOLODEX_PAGE_SIZE`: Override the local page size
    /// - `HOLODEX_RESOLVE_TIMEOUT_SECS`: Override the per-reference timeout
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOLODEX_*` environment overrides in place.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOLODEX_BASE_URL") {
            tracing::debug!("Override api.base_url from env: {}", val);
            self.api.base_url = val;
        }

        if let Ok(val) = std::env::var("HOLODEX_PAGE_SIZE") {
            if let Ok(page_size) = val.parse() {
                self.listing.page_size = page_size;
                tracing::debug!("Override listing.page_size from env: {}", page_size);
            }
        }

        if let Ok(val) = std::env::var("HOLODEX_RESOLVE_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.enrichment.resolve_timeout_secs = secs;
                tracing::debug!("Override enrichment.resolve_timeout_secs from env: {}", secs);
            }
        }
    }

    /// Check value constraints that serde defaults cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.listing.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.page_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.max_pages".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/holodex/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "holodex", "holodex").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API, without trailing slash
    pub base_url: String,
    /// Collection path segment to page through
    pub collection: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Upper bound on followed `next` links per aggregation
    pub max_pages: u32,
}

impl ApiConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://swapi.dev/api".to_string(),
            collection: "people".to_string(),
            timeout_secs: 30,
            user_agent: "Holodex/0.1.0 (+https://github.com/holodex/holodex)".to_string(),
            max_pages: 100,
        }
    }
}

/// Local pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Records per displayed page
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Category label enrichment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Upper bound on a single reference lookup, in seconds
    pub resolve_timeout_secs: u64,
    /// Label for records without any category reference
    pub default_label: String,
    /// Label used when a lookup fails
    pub fallback_label: String,
}

impl EnrichmentConfig {
    /// Per-reference timeout as a `Duration`.
    #[must_use]
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            resolve_timeout_secs: 10,
            default_label: "Human".to_string(),
            fallback_label: "Unknown".to_string(),
        }
    }
}

/// Mock authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted username
    pub username: String,
    /// Accepted password
    pub password: String,
    /// Silent token refresh interval in seconds
    pub refresh_interval_secs: u64,
}

impl AuthConfig {
    /// Refresh interval as a `Duration`.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "user".to_string(),
            password: "pass".to_string(),
            refresh_interval_secs: 5 * 60,
        }
    }
}
