//! HTTP request handlers

use super::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Search handler: the body is passed to the router untouched
pub async fn search(State(state): State<AppState>, body: Bytes) -> Response {
    tracing::debug!("Received raw request data: {}", String::from_utf8_lossy(&body));

    let routed = state.router.handle(&body).await;
    let status = if routed.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(routed.body)).into_response()
}

/// OPTIONS without CORS preflight headers still gets an empty 200
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Health check handler, reporting the active cache configuration
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let cache = &state.settings.cache;
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "cache": {
            "backend": cache.backend,
            "ttl": cache.ttl
        }
    }))
}
