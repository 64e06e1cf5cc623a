//! Vector index abstraction for Prosno.
//!
//! Provides a trait-based interface over the externally managed vector index.
//! The index is pre-populated; this crate only queries it.

mod pinecone;

pub use pinecone::PineconeIndex;

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// A single match returned by a similarity query.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexMatch {
    /// Stored vector ID.
    pub id: String,
    /// Similarity score (higher is better).
    #[serde(default)]
    pub score: f32,
    /// Metadata stored alongside the vector. The `text` field carries the
    /// passage payload; other fields are ignored.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl IndexMatch {
    /// Extract the passage text from the match metadata.
    ///
    /// A match without a string `text` field yields the empty string rather
    /// than an error, so callers always get one entry per match.
    pub fn text(&self) -> String {
        self.metadata
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }
}

/// Trait for vector index implementations.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Query the index for the `top_k` nearest neighbors of a vector,
    /// ordered by descending similarity.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_extraction() {
        let json = r#"{"id":"ch4-p12","score":0.87,"metadata":{"text":"তাপ এক প্রকার শক্তি","page":12}}"#;
        let m: IndexMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.text(), "তাপ এক প্রকার শক্তি");
    }

    #[test]
    fn test_text_missing_yields_empty_string() {
        let json = r#"{"id":"ch4-p13","score":0.5,"metadata":{"page":13}}"#;
        let m: IndexMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.text(), "");
    }

    #[test]
    fn test_metadata_absent_entirely() {
        let json = r#"{"id":"ch4-p14"}"#;
        let m: IndexMatch = serde_json::from_str(json).unwrap();
        assert_eq!(m.score, 0.0);
        assert_eq!(m.text(), "");
    }
}
