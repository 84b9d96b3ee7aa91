//! Unbounded in-memory cache with lazy expiry

use super::{CacheEntry, RequestSignature, ResponseCache};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Map from signature to entry guarded by a mutex.
///
/// Expired entries stay in the map until overwritten or purged.
pub struct MemoryCache {
    entries: Mutex<HashMap<RequestSignature, CacheEntry>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before - entries.len()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::CACHE_TTL))
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, signature: &RequestSignature) -> Option<CacheEntry> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(signature)?;

        if entry.is_expired(self.ttl) {
            debug!("Cache entry {} expired", signature);
            return None;
        }

        Some(entry.clone())
    }

    async fn put(&self, signature: RequestSignature, payload: Value) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(signature.clone(), CacheEntry::new(signature, payload));
        }
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
