//! Caching module for Search-Router
//!
//! Caches decoded provider payloads keyed by a signature of the outbound
//! request URL. Entries expire lazily: a lookup at or past the TTL is a miss.

mod bounded;
mod memory;

pub use bounded::BoundedCache;
pub use memory::MemoryCache;

use crate::config::{CacheBackend, CacheSettings};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Deterministic cache key derived from a fully built request URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestSignature(String);

impl RequestSignature {
    /// Digest `url` under a provider namespace
    pub fn from_url(namespace: &str, url: &str) -> Self {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());

        Self(format!("{}_{:x}", namespace, hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached payload and the moment it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub signature: RequestSignature,
    pub payload: Value,
    pub stored_at: Instant,
}

impl CacheEntry {
    pub fn new(signature: RequestSignature, payload: Value) -> Self {
        Self {
            signature,
            payload,
            stored_at: Instant::now(),
        }
    }

    /// An entry is stale once its age reaches the TTL
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Storage for provider responses
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Fresh entry for `signature`, if any
    async fn get(&self, signature: &RequestSignature) -> Option<CacheEntry>;

    /// Store `payload`, replacing any existing entry with a fresh timestamp
    async fn put(&self, signature: RequestSignature, payload: Value);

    /// Time-to-live applied to entries
    fn ttl(&self) -> Duration;
}

/// Build the cache selected in settings
pub fn from_settings(settings: &CacheSettings) -> Arc<dyn ResponseCache> {
    match settings.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new(settings.ttl())),
        CacheBackend::Bounded => {
            Arc::new(BoundedCache::new(settings.ttl(), settings.max_capacity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_deterministic() {
        let url = "https://pixabay.com/api/?key=k&q=cats&page=1";
        let a = RequestSignature::from_url("pixabay", url);
        let b = RequestSignature::from_url("pixabay", url);
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("pixabay_"));
        // namespace + '_' + 64 hex chars
        assert_eq!(a.as_str().len(), "pixabay_".len() + 64);
    }

    #[test]
    fn test_signature_covers_query_parameters() {
        let a = RequestSignature::from_url("pixabay", "https://pixabay.com/api/?q=cats&page=1");
        let b = RequestSignature::from_url("pixabay", "https://pixabay.com/api/?q=cats&page=2");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_from_settings_uses_ttl() {
        let settings = CacheSettings {
            ttl: 42,
            backend: CacheBackend::Bounded,
            ..Default::default()
        };
        let cache = from_settings(&settings);
        assert_eq!(cache.ttl(), Duration::from_secs(42));

        let cache = from_settings(&CacheSettings::default());
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }
}
