//! Error types for outbound requests, providers and the search router

use thiserror::Error;

/// Failure of a single outbound HTTP request
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, TLS, redirect or timeout failure
    #[error("API request failed: {0}")]
    Transport(String),

    /// Provider answered with a status code >= 400
    #[error("API returned error code: {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for diagnostics only
        body: String,
    },

    /// Provider answered successfully but the body is not valid JSON
    #[error("Failed to decode API response: {message}")]
    Decode {
        /// Parser message
        message: String,
        /// Raw response body
        body: String,
    },
}

impl HttpError {
    /// Build a transport error from a reqwest error, keeping the whole source
    /// chain. The request URL is dropped since it can carry an API key.
    pub fn transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let mut reason = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !reason.contains(&text) {
                reason.push_str(": ");
                reason.push_str(&text);
            }
            source = cause.source();
        }
        if err.is_timeout() && !reason.contains("timed out") {
            reason.push_str(" (timed out)");
        }
        HttpError::Transport(reason)
    }
}

/// Failure of a provider operation
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Well-formed JSON that does not have the expected shape
    #[error("Unexpected API response structure")]
    Schema,
}

/// Any failure that ends a search request
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed or missing caller input
    #[error("{0}")]
    Validation(String),

    #[error("AI summary generation failed: {0}")]
    Summary(#[source] ProviderError),

    #[error("Image search failed: {0}")]
    Images(#[source] ProviderError),

    /// Error reported inside an otherwise successful provider payload
    #[error("{0}")]
    Upstream(String),
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        SearchError::Validation(message.into())
    }
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_messages() {
        let err = HttpError::Status {
            status: 403,
            body: "{\"error\":\"forbidden\"}".to_string(),
        };
        assert_eq!(err.to_string(), "API returned error code: 403");

        let err = HttpError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "API request failed: connection refused");
    }

    #[test]
    fn test_search_error_wraps_provider_cause() {
        let err = SearchError::Summary(ProviderError::Schema);
        assert_eq!(
            err.to_string(),
            "AI summary generation failed: Unexpected API response structure"
        );

        let err = SearchError::Images(ProviderError::Http(HttpError::Decode {
            message: "expected value at line 1 column 1".to_string(),
            body: "<html>".to_string(),
        }));
        assert_eq!(
            err.to_string(),
            "Image search failed: Failed to decode API response: expected value at line 1 column 1"
        );
    }
}
