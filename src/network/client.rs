//! HTTP client for making requests to providers

use crate::config::OutgoingSettings;
use crate::error::HttpError;
use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::{redirect, Client};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Outbound HTTP client shared by all providers
///
/// One call is one request: redirects are followed up to the configured
/// limit, certificates are always verified, idle connections are not kept
/// and nothing is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .http1_only()
            .pool_max_idle_per_host(0)
            .user_agent(concat!("search-router/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Send a request and decode the JSON response.
    ///
    /// With a body the request is a POST carrying the body as JSON, otherwise
    /// it is a GET. Status codes >= 400 are errors even when the body is JSON.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<&B>,
    ) -> std::result::Result<Value, HttpError> {
        let request = match body {
            Some(body) => self.client.post(url).json(body),
            None => self.client.get(url),
        };

        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                let err = HttpError::transport(e);
                warn!("Request failed: {}", err);
                err
            })?;

        let status = response.status().as_u16();
        debug!("API response code: {}", status);

        let text = response.text().await.map_err(HttpError::transport)?;

        if status >= 400 {
            warn!("HTTP error: response code {}", status);
            debug!("Response body: {}", text);
            return Err(HttpError::Status { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| {
            warn!("JSON decode error: {}", e);
            debug!("Raw response: {}", text);
            HttpError::Decode {
                message: e.to_string(),
                body: text,
            }
        })
    }

    /// GET request without extra headers
    pub async fn get(&self, url: &str) -> std::result::Result<Value, HttpError> {
        self.send::<Value>(url, HeaderMap::new(), None).await
    }

    /// POST a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &B,
    ) -> std::result::Result<Value, HttpError> {
        self.send(url, headers, Some(body)).await
    }
}
