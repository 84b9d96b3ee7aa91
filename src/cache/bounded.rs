//! Capacity-bounded cache backed by moka

use super::{CacheEntry, RequestSignature, ResponseCache};
use async_trait::async_trait;
use moka::future::Cache;
use serde_json::Value;
use std::time::Duration;

/// Bounded cache for long-running deployments.
///
/// moka evicts by capacity and TTL; the entry age is checked again on read so
/// the expiry boundary matches [`super::MemoryCache`].
pub struct BoundedCache {
    cache: Cache<RequestSignature, CacheEntry>,
    ttl: Duration,
}

impl BoundedCache {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();

        Self { cache, ttl }
    }
}

#[async_trait]
impl ResponseCache for BoundedCache {
    async fn get(&self, signature: &RequestSignature) -> Option<CacheEntry> {
        self.cache
            .get(signature)
            .await
            .filter(|entry| !entry.is_expired(self.ttl))
    }

    async fn put(&self, signature: RequestSignature, payload: Value) {
        let entry = CacheEntry::new(signature.clone(), payload);
        self.cache.insert(signature, entry).await;
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
