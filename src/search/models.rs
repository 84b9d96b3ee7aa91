//! Inbound request and outbound envelope types

use crate::error::SearchError;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of search requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Text,
    Images,
    /// Accepted but not backed by a provider; always returns no results
    Videos,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Text => "text",
            SearchType::Images => "images",
            SearchType::Videos => "videos",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    /// Expects an already normalized (trimmed, lowercase) value
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SearchType::Text),
            "images" => Ok(SearchType::Images),
            "videos" => Ok(SearchType::Videos),
            other => Err(SearchError::validation(format!(
                "Invalid search type: {}",
                other
            ))),
        }
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed, non-empty query
    pub query: String,
    pub search_type: SearchType,
}

/// Result of parsing an inbound body.
///
/// `type_label` is what a failure envelope reports as `type`: `None` until
/// the query field has been found, then the normalized requested type, even
/// when that type turns out to be invalid.
#[derive(Debug)]
pub struct ParsedRequest {
    pub type_label: Option<String>,
    pub request: Result<SearchRequest, SearchError>,
}

impl SearchRequest {
    /// Parse and validate a raw request body
    pub fn parse(body: &[u8]) -> ParsedRequest {
        let mut type_label = None;
        let request = Self::parse_inner(body, &mut type_label);
        ParsedRequest { type_label, request }
    }

    fn parse_inner(body: &[u8], type_label: &mut Option<String>) -> Result<Self, SearchError> {
        if body.is_empty() {
            return Err(SearchError::validation("No data received"));
        }

        let data: Value = serde_json::from_slice(body)
            .map_err(|e| SearchError::validation(format!("Invalid JSON: {}", e)))?;

        let query = match data.get("query") {
            None | Some(Value::Null) => {
                return Err(SearchError::validation("Query parameter is required"))
            }
            Some(query) => query,
        };

        let raw_type = match data.get("type") {
            None | Some(Value::Null) => SearchType::default().as_str().to_string(),
            Some(Value::String(t)) => t.trim().to_lowercase(),
            Some(other) => other.to_string().to_lowercase(),
        };
        *type_label = Some(raw_type.clone());

        let query = match query {
            Value::String(q) => q.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return Err(SearchError::validation("Query parameter must be a string")),
        };
        if query.is_empty() {
            return Err(SearchError::validation("Query cannot be empty"));
        }

        let search_type = raw_type.parse()?;

        Ok(Self { query, search_type })
    }
}

/// Uniform response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Images {
        hits: Vec<Value>,
        total: u64,
        total_hits: u64,
    },
    Text {
        ai_summary: String,
    },
    Videos,
    Failure {
        message: String,
        search_type: String,
    },
}

impl SearchResponse {
    /// Failure envelope for `err`, reporting `type_label` or "unknown"
    pub fn failure(err: &SearchError, type_label: Option<&str>) -> Self {
        SearchResponse::Failure {
            message: err.to_string(),
            search_type: type_label.unwrap_or("unknown").to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, SearchResponse::Failure { .. })
    }

    /// JSON body of the envelope
    pub fn to_json(&self) -> Value {
        match self {
            SearchResponse::Images {
                hits,
                total,
                total_hits,
            } => json!({
                "success": true,
                "type": SearchType::Images,
                "hits": hits,
                "total": total,
                "totalHits": total_hits,
            }),
            SearchResponse::Text { ai_summary } => json!({
                "success": true,
                "type": SearchType::Text,
                "ai_summary": ai_summary,
                "search_results": [],
            }),
            SearchResponse::Videos => json!({
                "success": true,
                "type": SearchType::Videos,
                "results": [],
            }),
            SearchResponse::Failure {
                message,
                search_type,
            } => json!({
                "success": false,
                "error": true,
                "message": message,
                "type": search_type,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ParsedRequest {
        SearchRequest::parse(body.as_bytes())
    }

    fn message(parsed: ParsedRequest) -> String {
        parsed.request.unwrap_err().to_string()
    }

    #[test]
    fn test_parse_defaults_to_text() {
        let parsed = parse(r#"{"query": "  rust lang  "}"#);
        let request = parsed.request.unwrap();
        assert_eq!(request.query, "rust lang");
        assert_eq!(request.search_type, SearchType::Text);
        assert_eq!(parsed.type_label.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_normalizes_type() {
        let request = parse(r#"{"query": "cats", "type": "  IMAGES "}"#).request.unwrap();
        assert_eq!(request.search_type, SearchType::Images);
    }

    #[test]
    fn test_empty_body() {
        let parsed = parse("");
        assert_eq!(parsed.type_label, None);
        assert_eq!(message(parsed), "No data received");
    }

    #[test]
    fn test_invalid_json() {
        let parsed = parse("{query:");
        assert_eq!(parsed.type_label, None);
        assert!(message(parsed).starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_missing_query() {
        let parsed = parse(r#"{"type": "images"}"#);
        assert_eq!(parsed.type_label, None);
        assert_eq!(message(parsed), "Query parameter is required");

        assert_eq!(message(parse(r#"{"query": null}"#)), "Query parameter is required");
        assert_eq!(message(parse("[1, 2]")), "Query parameter is required");
    }

    #[test]
    fn test_blank_query() {
        let parsed = parse(r#"{"query": " \t\n ", "type": "images"}"#);
        assert_eq!(parsed.type_label.as_deref(), Some("images"));
        assert_eq!(message(parsed), "Query cannot be empty");
    }

    #[test]
    fn test_invalid_type() {
        let parsed = parse(r#"{"query": "song", "type": "Audio"}"#);
        assert_eq!(parsed.type_label.as_deref(), Some("audio"));
        assert_eq!(message(parsed), "Invalid search type: audio");
    }

    #[test]
    fn test_numeric_query_is_accepted() {
        let request = parse(r#"{"query": 42}"#).request.unwrap();
        assert_eq!(request.query, "42");
    }

    #[test]
    fn test_envelopes() {
        let images = SearchResponse::Images {
            hits: vec![json!({"id": 1})],
            total: 5,
            total_hits: 1,
        };
        assert_eq!(
            images.to_json(),
            json!({"success": true, "type": "images", "hits": [{"id": 1}], "total": 5, "totalHits": 1})
        );

        let text = SearchResponse::Text {
            ai_summary: "hello".to_string(),
        };
        assert_eq!(
            text.to_json(),
            json!({"success": true, "type": "text", "ai_summary": "hello", "search_results": []})
        );

        assert_eq!(
            SearchResponse::Videos.to_json(),
            json!({"success": true, "type": "videos", "results": []})
        );

        let failure = SearchResponse::failure(&SearchError::validation("No data received"), None);
        assert!(!failure.is_success());
        assert_eq!(
            failure.to_json(),
            json!({"success": false, "error": true, "message": "No data received", "type": "unknown"})
        );
    }
}
