//! Pinecone hosted-inference embeddings implementation.

use super::Embedder;
use crate::error::{ProsnoError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Pinned API version for the inference endpoint.
const API_VERSION: &str = "2024-10";

/// Timeout for embedding requests.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Embedder backed by the vector service's hosted inference API.
///
/// Queries are embedded with `input_type: "query"` so they land in the same
/// space as the passage vectors the index was populated with.
pub struct PineconeEmbedder {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl PineconeEmbedder {
    /// Create a new embedder for the given inference endpoint and model.
    pub fn new(api_base: &str, api_key: &str, model: &str, dimensions: usize) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            dimensions,
        }
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    parameters: EmbedParameters<'a>,
    inputs: Vec<EmbedInput<'a>>,
}

#[derive(Serialize)]
struct EmbedParameters<'a> {
    input_type: &'a str,
    truncate: &'a str,
}

#[derive(Serialize)]
struct EmbedInput<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    values: Vec<f32>,
}

#[async_trait]
impl Embedder for PineconeEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Generating query embedding with {}", self.model);

        let request = EmbedRequest {
            model: &self.model,
            parameters: EmbedParameters {
                input_type: "query",
                truncate: "END",
            },
            inputs: vec![EmbedInput { text }],
        };

        let response = self
            .http
            .post(format!("{}/embed", self.api_base))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProsnoError::Embedding(format!("Embedding API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProsnoError::Embedding(format!(
                "Embedding API returned {}: {}",
                status, body
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| ProsnoError::Embedding(format!("Malformed embedding response: {}", e)))?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.values)
            .ok_or_else(|| ProsnoError::Embedding("Empty embedding response".to_string()))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let embedder = PineconeEmbedder::new("https://api.pinecone.io/", "key", "multilingual-e5-large", 1024);
        assert_eq!(embedder.dimensions(), 1024);
        // Trailing slash is normalized away so URL joining stays predictable.
        assert_eq!(embedder.api_base, "https://api.pinecone.io");
    }

    #[test]
    fn test_embed_request_shape() {
        let request = EmbedRequest {
            model: "multilingual-e5-large",
            parameters: EmbedParameters {
                input_type: "query",
                truncate: "END",
            },
            inputs: vec![EmbedInput { text: "তাপগতিবিদ্যা" }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "multilingual-e5-large");
        assert_eq!(value["parameters"]["input_type"], "query");
        assert_eq!(value["inputs"][0]["text"], "তাপগতিবিদ্যা");
    }

    #[test]
    fn test_embed_response_parsing() {
        let json = r#"{"model":"multilingual-e5-large","data":[{"values":[0.1,0.2,0.3]}],"usage":{"total_tokens":4}}"#;
        let parsed: EmbedResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].values, vec![0.1, 0.2, 0.3]);
    }
}
