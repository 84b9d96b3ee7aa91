//! Content providers
//!
//! One module per third-party API with its request builders and response
//! shapes, plus the client that calls them.

mod client;
pub mod gemini;
pub mod pixabay;

pub use client::ProviderClient;
