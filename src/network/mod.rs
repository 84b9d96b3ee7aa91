//! HTTP networking module
//!
//! Provides the outbound HTTP client used by the providers.

mod client;

pub use client::HttpClient;
