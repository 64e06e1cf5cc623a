//! Passage retrieval for MCQ generation.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_index::VectorIndex;
use std::sync::Arc;
use tracing::debug;

/// Retrieves passage texts for a query.
pub struct Retriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    /// Create a new retriever.
    pub fn new(index: Arc<dyn VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            index,
            embedder,
            top_k: 5,
        }
    }

    /// Set the number of passages to retrieve.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieve up to `top_k` passage texts for a query, ordered by
    /// descending similarity as returned by the index.
    ///
    /// Zero matches yields an empty vector, not an error. A match without a
    /// `text` payload contributes the empty string, so the result always has
    /// one entry per match.
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        let query_embedding = self.embedder.embed(query).await?;

        let matches = self.index.query(&query_embedding, self.top_k).await?;
        debug!("Retrieved {} of up to {} passages", matches.len(), self.top_k);

        Ok(matches.iter().map(|m| m.text()).collect())
    }
}

/// Join retrieved passages into a single context string, blank-line separated.
pub fn join_context(snippets: &[String]) -> String {
    snippets.join("\n\n")
}
