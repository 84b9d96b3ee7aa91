//! Pixabay image search request building and payload reading

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use url::Url;

/// Default page size
pub const PER_PAGE: u32 = 24;

/// Fixed filter parameters sent with every search
const SAFE_SEARCH: &str = "true";
const IMAGE_TYPE: &str = "photo";
const LANG: &str = "en";

/// Build the fully qualified search URL
pub fn search_url(endpoint: &Url, key: &str, query: &str, page: u32, per_page: u32) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("key", key)
        .append_pair("q", query)
        .append_pair("page", &page.to_string())
        .append_pair("per_page", &per_page.to_string())
        .append_pair("safesearch", SAFE_SEARCH)
        .append_pair("image_type", IMAGE_TYPE)
        .append_pair("lang", LANG);
    url
}

/// Copy of `url` suitable for logs, with the key masked
pub fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Image search payload with missing or mistyped fields defaulted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageResults {
    pub hits: Vec<Value>,
    pub total: u64,
    pub total_hits: u64,
    /// Any non-null `error` reported by the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ImageResults {
    /// Provider-reported error as text, strings unquoted
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn from_payload(payload: &Value) -> Self {
        match serde_json::from_value(payload.clone()) {
            Ok(results) => results,
            Err(e) => {
                warn!("Image payload did not match expected fields: {}", e);
                Self::lenient(payload)
            }
        }
    }

    fn lenient(payload: &Value) -> Self {
        Self {
            hits: payload
                .get("hits")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            total: payload.get("total").and_then(Value::as_u64).unwrap_or(0),
            total_hits: payload.get("totalHits").and_then(Value::as_u64).unwrap_or(0),
            error: payload.get("error").filter(|e| !e.is_null()).cloned(),
        }
    }
}
