//! Request routing: validate, dispatch to a provider, wrap in the envelope

use super::escape::escape_value;
use super::models::{SearchRequest, SearchResponse, SearchType};
use crate::error::{Result, SearchError};
use crate::providers::pixabay::ImageResults;
use crate::providers::ProviderClient;
use serde_json::Value;
use tracing::{error, info};

/// Final, escaped response for one request
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedResponse {
    pub success: bool,
    pub body: Value,
}

/// Single point where every failure becomes a failure envelope
#[derive(Clone)]
pub struct RequestRouter {
    providers: ProviderClient,
}

impl RequestRouter {
    pub fn new(providers: ProviderClient) -> Self {
        Self { providers }
    }

    /// Handle a raw request body
    pub async fn handle(&self, body: &[u8]) -> RoutedResponse {
        let parsed = SearchRequest::parse(body);

        let response = match parsed.request {
            Ok(request) => match self.dispatch(&request).await {
                Ok(response) => {
                    info!("Sending successful response for type {}", request.search_type);
                    response
                }
                Err(err) => {
                    error!("Search failed: {}", err);
                    SearchResponse::failure(&err, parsed.type_label.as_deref())
                }
            },
            Err(err) => {
                error!("Rejected search request: {}", err);
                SearchResponse::failure(&err, parsed.type_label.as_deref())
            }
        };

        let mut body = response.to_json();
        escape_value(&mut body);

        RoutedResponse {
            success: response.is_success(),
            body,
        }
    }

    /// Run a validated request against its provider
    pub async fn dispatch(&self, request: &SearchRequest) -> Result<SearchResponse> {
        match request.search_type {
            SearchType::Images => {
                info!("Processing image search for query: {}", request.query);
                let payload = self
                    .providers
                    .search_images_first_page(&request.query)
                    .await
                    .map_err(SearchError::Images)?;

                let results = ImageResults::from_payload(&payload);
                if let Some(message) = results.error_message() {
                    return Err(SearchError::Upstream(message));
                }

                Ok(SearchResponse::Images {
                    hits: results.hits,
                    total: results.total,
                    total_hits: results.total_hits,
                })
            }
            SearchType::Text => {
                info!("Processing text search with AI summary for query: {}", request.query);
                let ai_summary = self
                    .providers
                    .generate_summary(&request.query)
                    .await
                    .map_err(SearchError::Summary)?;

                Ok(SearchResponse::Text { ai_summary })
            }
            SearchType::Videos => {
                info!("Processing video search for query: {}", request.query);
                Ok(SearchResponse::Videos)
            }
        }
    }
}
