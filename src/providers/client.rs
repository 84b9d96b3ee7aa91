//! Provider client: summary generation and image search

use super::{gemini, pixabay};
use crate::cache::{RequestSignature, ResponseCache};
use crate::config::{ApiCredentials, ProviderSettings};
use crate::error::ProviderError;
use crate::network::HttpClient;
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Calls the text-generation and image-search providers.
///
/// Only image searches go through the cache; every summary is generated fresh.
#[derive(Clone)]
pub struct ProviderClient {
    http: HttpClient,
    cache: Arc<dyn ResponseCache>,
    gemini_endpoint: Url,
    gemini_headers: HeaderMap,
    pixabay_endpoint: Url,
    pixabay_key: String,
}

impl ProviderClient {
    pub fn new(
        http: HttpClient,
        credentials: &ApiCredentials,
        endpoints: &ProviderSettings,
        cache: Arc<dyn ResponseCache>,
    ) -> Result<Self> {
        credentials.validate()?;

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.gemini))?;
        bearer.set_sensitive(true);

        let mut gemini_headers = HeaderMap::new();
        gemini_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        gemini_headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            http,
            cache,
            gemini_endpoint: Url::parse(&endpoints.gemini_endpoint)?,
            gemini_headers,
            pixabay_endpoint: Url::parse(&endpoints.pixabay_endpoint)?,
            pixabay_key: credentials.pixabay.clone(),
        })
    }

    /// Generate an AI summary for `query`
    pub async fn generate_summary(&self, query: &str) -> Result<String, ProviderError> {
        info!("Generating AI summary for query: {}", query);

        let body = gemini::GenerateContentRequest::for_query(query);
        let payload = self
            .http
            .post_json(self.gemini_endpoint.as_str(), self.gemini_headers.clone(), &body)
            .await?;

        let summary = gemini::extract_summary(payload).map_err(|e| {
            warn!("Gemini response had an unexpected structure");
            e
        })?;

        debug!("Successfully generated AI summary ({} bytes)", summary.len());
        Ok(summary)
    }

    /// Search images, serving repeated identical searches from the cache
    pub async fn search_images(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Value, ProviderError> {
        info!("Searching images for query: {}", query);

        let url = pixabay::search_url(&self.pixabay_endpoint, &self.pixabay_key, query, page, per_page);
        let signature = RequestSignature::from_url("pixabay", url.as_str());

        if let Some(entry) = self.cache.get(&signature).await {
            debug!("Cache hit for {}", signature);
            return Ok(entry.payload);
        }

        debug!("Cache miss, requesting {}", pixabay::redact_key(&url));
        let payload = self.http.get(url.as_str()).await?;

        self.cache.put(signature, payload.clone()).await;

        let hits = payload
            .get("hits")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        info!("Successfully retrieved {} images", hits);

        Ok(payload)
    }

    /// Image search with the default paging
    pub async fn search_images_first_page(&self, query: &str) -> Result<Value, ProviderError> {
        self.search_images(query, 1, pixabay::PER_PAGE).await
    }
}
