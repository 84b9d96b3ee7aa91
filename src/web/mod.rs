//! Web server module
//!
//! Exposes the search router over HTTP.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
