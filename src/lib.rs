//! Search-Router: a JSON search router for AI summaries and image search
//!
//! Accepts a query, dispatches it to a content provider and returns the
//! result in a uniform success/failure envelope.

pub mod cache;
pub mod config;
pub mod error;
pub mod network;
pub mod providers;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{HttpError, ProviderError, SearchError};
pub use search::{RequestRouter, SearchRequest, SearchResponse, SearchType};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default total timeout for provider requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Maximum redirects followed per request
pub const MAX_REDIRECTS: usize = 5;

/// Default response cache time-to-live in seconds
pub const CACHE_TTL: u64 = 300;
