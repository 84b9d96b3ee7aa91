//! Application state shared across handlers

use crate::cache;
use crate::config::Settings;
use crate::network::HttpClient;
use crate::providers::ProviderClient;
use crate::search::RequestRouter;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search router; its cache is shared by every request
    pub router: Arc<RequestRouter>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let cache = cache::from_settings(&settings.cache);
        let providers = ProviderClient::new(client, &settings.api_keys, &settings.providers, cache)?;

        Ok(Self {
            settings: Arc::new(settings),
            router: Arc::new(RequestRouter::new(providers)),
        })
    }
}
