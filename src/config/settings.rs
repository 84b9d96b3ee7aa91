//! Settings structures for Search-Router configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default text-generation endpoint
pub const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Default image-search endpoint
pub const PIXABAY_ENDPOINT: &str = "https://pixabay.com/api/";

/// Main settings structure, mirrors settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub api_keys: ApiCredentials,
    pub providers: ProviderSettings,
    pub cache: CacheSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SEARCH_ROUTER_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|name| std::env::var(name).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SEARCH_ROUTER_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("SEARCH_ROUTER_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("SEARCH_ROUTER_GEMINI_API_KEY") {
            self.api_keys.gemini = val;
        }
        if let Some(val) = var("SEARCH_ROUTER_PIXABAY_API_KEY") {
            self.api_keys.pixabay = val;
        }
        if let Some(val) = var("SEARCH_ROUTER_CACHE_TTL") {
            if let Ok(ttl) = val.parse() {
                self.cache.ttl = ttl;
            }
        }
    }

    /// Reject settings the router cannot start with
    pub fn validate(&self) -> Result<()> {
        self.api_keys.validate()?;

        if self.outgoing.request_timeout <= 0.0 {
            bail!("Configuration error: outgoing.request_timeout must be positive");
        }
        if self.cache.ttl == 0 {
            bail!("Configuration error: cache.ttl must be at least one second");
        }
        for (name, endpoint) in [
            ("gemini_endpoint", &self.providers.gemini_endpoint),
            ("pixabay_endpoint", &self.providers.pixabay_endpoint),
        ] {
            match url::Url::parse(endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => bail!("Configuration error: providers.{} is not a valid URL", name),
            }
        }

        Ok(())
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
///
/// Certificate verification is always enabled and has no switch here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Total request timeout in seconds
    pub request_timeout: f64,
    /// Maximum number of redirects to follow
    pub max_redirects: usize,
}

impl OutgoingSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout)
    }
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            max_redirects: crate::MAX_REDIRECTS,
        }
    }
}

/// Provider API keys, loaded once at start-up
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiCredentials {
    pub gemini: String,
    pub pixabay: String,
}

impl ApiCredentials {
    pub fn new(gemini: impl Into<String>, pixabay: impl Into<String>) -> Self {
        Self {
            gemini: gemini.into(),
            pixabay: pixabay.into(),
        }
    }

    /// Every reachable provider needs a non-empty key
    pub fn validate(&self) -> Result<()> {
        for (provider, key) in [("gemini", &self.gemini), ("pixabay", &self.pixabay)] {
            if key.trim().is_empty() {
                bail!("Configuration error: API key for {} not found", provider);
            }
        }
        Ok(())
    }
}

// Keys stay out of logs and debug output.
impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("gemini", &redacted(&self.gemini))
            .field("pixabay", &redacted(&self.pixabay))
            .finish()
    }
}

fn redacted(key: &str) -> &'static str {
    if key.is_empty() {
        "<missing>"
    } else {
        "<redacted>"
    }
}

/// Provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub gemini_endpoint: String,
    pub pixabay_endpoint: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            gemini_endpoint: GEMINI_ENDPOINT.to_string(),
            pixabay_endpoint: PIXABAY_ENDPOINT.to_string(),
        }
    }
}

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Entry time-to-live in seconds
    pub ttl: u64,
    /// Cache implementation
    pub backend: CacheBackend,
    /// Capacity of the bounded backend
    pub max_capacity: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: crate::CACHE_TTL,
            backend: CacheBackend::default(),
            max_capacity: 10_000,
        }
    }
}

/// Which cache implementation backs image searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    /// Unbounded map with lazy expiry
    #[default]
    Memory,
    /// Capacity-bounded cache with eviction
    Bounded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_keys() -> Settings {
        Settings {
            api_keys: ApiCredentials::new("gemini-key", "pixabay-key"),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.outgoing.timeout(), Duration::from_secs(30));
        assert_eq!(settings.outgoing.max_redirects, 5);
        assert_eq!(settings.cache.ttl(), Duration::from_secs(300));
        assert_eq!(settings.cache.backend, CacheBackend::Memory);
        assert_eq!(settings.providers.pixabay_endpoint, PIXABAY_ENDPOINT);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let settings = Settings::default();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("gemini"));

        let mut settings = with_keys();
        settings.api_keys.pixabay = "   ".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("pixabay"));

        assert!(with_keys().validate().is_ok());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut settings = with_keys();
        settings.providers.gemini_endpoint = "not a url".to_string();
        assert!(settings.validate().is_err());

        settings.providers.gemini_endpoint = "ftp://example.com/".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
server:
  port: 9000
api_keys:
  gemini: abc
  pixabay: def
cache:
  ttl: 60
  backend: bounded
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
        assert_eq!(settings.api_keys.gemini, "abc");
        assert_eq!(settings.cache.ttl, 60);
        assert_eq!(settings.cache.backend, CacheBackend::Bounded);
        assert_eq!(settings.cache.max_capacity, 10_000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SEARCH_ROUTER_PORT", "9100"),
            ("SEARCH_ROUTER_GEMINI_API_KEY", "from-env"),
            ("SEARCH_ROUTER_CACHE_TTL", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.api_keys.gemini, "from-env");
        assert_eq!(settings.cache.ttl, 300);
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = ApiCredentials::new("secret-one", "");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-one"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("<missing>"));
    }
}
