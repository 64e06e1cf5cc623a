//! Pinecone data-plane query client.

use super::{IndexMatch, VectorIndex};
use crate::error::{ProsnoError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Pinned API version for data-plane requests.
const API_VERSION: &str = "2024-10";

/// Timeout for index queries.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for a single Pinecone index, fixed at construction.
pub struct PineconeIndex {
    http: reqwest::Client,
    query_url: Url,
    api_key: String,
}

impl PineconeIndex {
    /// Create a client for the index served at `host`.
    ///
    /// `host` is the index's data-plane URL; a scheme is added if missing.
    pub fn new(host: &str, api_key: &str) -> Result<Self> {
        let base = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        let query_url = Url::parse(&base)
            .and_then(|u| u.join("/query"))
            .map_err(|e| ProsnoError::Config(format!("Invalid index host '{}': {}", host, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            http,
            query_url,
            api_key: api_key.to_string(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<IndexMatch>,
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    #[instrument(skip(self, vector), fields(dimensions = vector.len()))]
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .http
            .post(self.query_url.clone())
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProsnoError::VectorIndex(format!("Index query failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProsnoError::VectorIndex(format!(
                "Index returned {}: {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| ProsnoError::VectorIndex(format!("Malformed index response: {}", e)))?;

        debug!("Index returned {} matches", parsed.matches.len());
        Ok(parsed.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_is_camel_case() {
        let vector = vec![0.1f32, 0.2];
        let request = QueryRequest {
            vector: &vector,
            top_k: 5,
            include_metadata: true,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["topK"], 5);
        assert_eq!(value["includeMetadata"], true);
        assert_eq!(value["vector"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_query_response_parsing() {
        let json = r#"{"matches":[{"id":"a","score":0.9,"metadata":{"text":"x"}},{"id":"b","score":0.4,"metadata":{}}],"namespace":""}"#;
        let parsed: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.matches.len(), 2);
        assert_eq!(parsed.matches[0].id, "a");
        assert_eq!(parsed.matches[1].text(), "");
    }

    #[test]
    fn test_empty_response_parses_to_no_matches() {
        let parsed: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn test_new_adds_scheme_when_missing() {
        let index = PineconeIndex::new("nctb-physics-abc.svc.pinecone.io", "key").unwrap();
        assert_eq!(
            index.query_url.as_str(),
            "https://nctb-physics-abc.svc.pinecone.io/query"
        );
    }

    #[test]
    fn test_new_rejects_malformed_host() {
        assert!(PineconeIndex::new("http://", "key").is_err());
    }
}
