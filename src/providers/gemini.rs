//! Gemini text-generation request and response shapes

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling temperature
pub const TEMPERATURE: f64 = 0.7;
/// Top-K sampling
pub const TOP_K: u32 = 40;
/// Nucleus sampling
pub const TOP_P: f64 = 0.95;
/// Maximum generated tokens
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

/// generateContent request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn prompt with the fixed generation parameters
    pub fn for_query(query: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: query.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// generateContent response, reduced to what the summary needs
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate
    pub fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

/// Pull the summary text out of a decoded response
pub fn extract_summary(payload: Value) -> Result<String, ProviderError> {
    serde_json::from_value::<GenerateContentResponse>(payload)
        .ok()
        .and_then(GenerateContentResponse::into_text)
        .ok_or(ProviderError::Schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::for_query("what is rust")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"parts": [{"text": "what is rust"}]}],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 1024
                }
            })
        );
    }

    #[test]
    fn test_extract_summary() {
        let payload = json!({
            "candidates": [{
                "content": {"parts": [{"text": "Rust is a language."}, {"text": "ignored"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        });
        assert_eq!(extract_summary(payload).unwrap(), "Rust is a language.");
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        for payload in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": 5}]}}]}),
            json!([1, 2, 3]),
        ] {
            assert!(matches!(extract_summary(payload), Err(ProviderError::Schema)));
        }
    }
}
