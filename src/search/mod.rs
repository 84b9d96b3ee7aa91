//! Search routing module
//!
//! Validates inbound requests, dispatches them to a provider and renders
//! the uniform response envelope.

mod escape;
mod models;
mod router;

pub use escape::{escape_html, escape_value};
pub use models::*;
pub use router::{RequestRouter, RoutedResponse};
