//! Configuration loaded from the environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PROVIDER_URL: &str = "https://api.semanticscholar.org/graph/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_AUTHOR_LIMIT: usize = 5;

/// Settings for the bibliographic data provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of the Graph API, without a trailing slash.
    pub base_url: String,
    /// Optional API key, sent as `x-api-key`.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Fixed wait before the single rate-limit retry, in milliseconds.
    pub retry_delay_ms: u64,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_URL.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

/// Top-level CiteGraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CiteGraphConfig {
    /// HTTP server port.
    pub port: u16,
    /// Provider connection settings.
    pub provider: ProviderSettings,
    /// Number of author names kept per paper.
    pub author_limit: usize,
}

impl Default for CiteGraphConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            provider: ProviderSettings::default(),
            author_limit: DEFAULT_AUTHOR_LIMIT,
        }
    }
}

impl CiteGraphConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unparseable numbers
    /// fall back to their defaults; a malformed provider URL is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let base_url = lookup("CITEGRAPH_PROVIDER_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "CITEGRAPH_PROVIDER_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let api_key = lookup("SEMANTIC_SCHOLAR_API_KEY").filter(|k| !k.trim().is_empty());

        let timeout_secs = lookup("CITEGRAPH_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|&v: &u64| v > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retry_delay_ms = lookup("CITEGRAPH_RETRY_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RETRY_DELAY_MS);

        let author_limit = lookup("CITEGRAPH_AUTHOR_LIMIT")
            .and_then(|v| v.parse().ok())
            .filter(|&v: &usize| v > 0)
            .unwrap_or(DEFAULT_AUTHOR_LIMIT);

        Ok(Self {
            port,
            provider: ProviderSettings {
                base_url,
                api_key,
                timeout_secs,
                retry_delay_ms,
            },
            author_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CiteGraphConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider.base_url, DEFAULT_PROVIDER_URL);
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.provider.timeout(), Duration::from_secs(30));
        assert_eq!(config.provider.retry_delay(), Duration::from_secs(1));
        assert_eq!(config.author_limit, 5);
    }

    #[test]
    fn test_overrides() {
        let config = CiteGraphConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("CITEGRAPH_PROVIDER_URL", "http://localhost:4000/graph/v1/"),
            ("SEMANTIC_SCHOLAR_API_KEY", "secret"),
            ("CITEGRAPH_TIMEOUT_SECS", "5"),
            ("CITEGRAPH_RETRY_DELAY_MS", "10"),
            ("CITEGRAPH_AUTHOR_LIMIT", "3"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.provider.base_url, "http://localhost:4000/graph/v1");
        assert_eq!(config.provider.api_key.as_deref(), Some("secret"));
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.retry_delay_ms, 10);
        assert_eq!(config.author_limit, 3);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = CiteGraphConfig::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("CITEGRAPH_TIMEOUT_SECS", "0"),
            ("CITEGRAPH_AUTHOR_LIMIT", "-1"),
        ]))
        .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.provider.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.author_limit, DEFAULT_AUTHOR_LIMIT);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = CiteGraphConfig::from_lookup(lookup_from(&[(
            "CITEGRAPH_PROVIDER_URL",
            "ftp://example.org",
        )]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = CiteGraphConfig::from_lookup(lookup_from(&[(
            "SEMANTIC_SCHOLAR_API_KEY",
            "secret",
        )]))
        .unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["provider"].get("api_key").is_none());
    }
}
