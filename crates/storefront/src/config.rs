//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_API_URL` - Base URL of the catalog service (default: `http://localhost:3000`)
//! - `CATALOG_USER_AGENT` - `User-Agent` header sent with every catalog request
//! - `HOMESTORE_SESSION_FILE` - Where the login session is kept
//!   (default: `.homestore/session.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default catalog service location (a local json-server).
pub const DEFAULT_CATALOG_API_URL: &str = "http://localhost:3000";

/// Default session file, relative to the working directory.
pub const DEFAULT_SESSION_FILE: &str = ".homestore/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog service connection settings
    pub catalog: CatalogConfig,
    /// Path of the persisted session record
    pub session_file: PathBuf,
}

/// Catalog service connection settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; resource paths (`products`, `cart`, ...) are appended to it
    pub api_url: Url,
    /// Optional `User-Agent` override
    pub user_agent: Option<String>,
}

impl CatalogConfig {
    /// Settings for a catalog service at `api_url`.
    #[must_use]
    pub const fn new(api_url: Url) -> Self {
        Self {
            api_url,
            user_agent: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = non_empty(lookup("CATALOG_API_URL"))
            .unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;
        let user_agent = non_empty(lookup("CATALOG_USER_AGENT"));
        let session_file = non_empty(lookup("HOMESTORE_SESSION_FILE"))
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        Ok(Self {
            catalog: CatalogConfig {
                api_url,
                user_agent,
            },
            session_file,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the catalog base URL; only http(s) is accepted.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            "CATALOG_API_URL".to_string(),
            format!("unsupported scheme '{other}', expected http or https"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.catalog.api_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.catalog.user_agent, None);
        assert_eq!(config.session_file, PathBuf::from(".homestore/session.json"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CATALOG_API_URL", "https://catalog.example.by/api/"),
            ("CATALOG_USER_AGENT", "hs/0.1"),
            ("HOMESTORE_SESSION_FILE", "/tmp/hs-session.json"),
        ])
        .unwrap();
        assert_eq!(config.catalog.api_url.host_str(), Some("catalog.example.by"));
        assert_eq!(config.catalog.user_agent.as_deref(), Some("hs/0.1"));
        assert_eq!(config.session_file, PathBuf::from("/tmp/hs-session.json"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[("CATALOG_API_URL", "  "), ("CATALOG_USER_AGENT", "")]).unwrap();
        assert_eq!(config.catalog.api_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.catalog.user_agent, None);
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = load(&[("CATALOG_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CATALOG_API_URL"));

        let err = load(&[("CATALOG_API_URL", "ftp://localhost:3000")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }
}
