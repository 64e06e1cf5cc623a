//! End-to-end pipeline for Prosno.
//!
//! Wires the embedder, the vector index, and the generator together once per
//! process and runs the retrieve-then-generate flow for each request.

use crate::config::{Credentials, Prompts, Settings};
use crate::embedding::{Embedder, PineconeEmbedder};
use crate::error::Result;
use crate::mcq::{join_context, ChatModel, CompletionModel, McqGenerator, Retriever};
use crate::vector_index::{PineconeIndex, VectorIndex};
use std::sync::Arc;
use tracing::{info, instrument};

/// The main pipeline: embed the query, retrieve passages, generate MCQs.
///
/// External clients are constructed once and shared. Every operation takes
/// `&self`, so a single pipeline can serve concurrent requests.
pub struct Pipeline {
    settings: Settings,
    retriever: Retriever,
    generator: McqGenerator,
}

impl Pipeline {
    /// Create a new pipeline from settings.
    ///
    /// Reads both API keys from the environment. A missing key or an
    /// unconfigured index host is a fatal configuration error.
    pub fn new(settings: Settings) -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

        let embedder: Arc<dyn Embedder> = Arc::new(PineconeEmbedder::new(
            &settings.embedding.api_base,
            &credentials.index_api_key,
            &settings.embedding.model,
            settings.embedding.dimensions as usize,
        ));

        let index: Arc<dyn VectorIndex> = Arc::new(PineconeIndex::new(
            settings.index_host()?,
            &credentials.index_api_key,
        )?);

        let model: Arc<dyn CompletionModel> = Arc::new(ChatModel::new(
            &settings.generation.api_base,
            &credentials.model_api_key,
            &settings.generation.model,
            settings.generation.temperature,
        ));

        Ok(Self::with_components(settings, prompts, embedder, index, model))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        model: Arc<dyn CompletionModel>,
    ) -> Self {
        let retriever = Retriever::new(index, embedder).with_top_k(settings.retrieval.top_k);
        let generator = McqGenerator::new(model, &prompts);

        Self {
            settings,
            retriever,
            generator,
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Retrieve passage texts for a free-form query.
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        self.retriever.search(query).await
    }

    /// Generate `count` MCQs for a chapter and topic.
    ///
    /// The search query is the chapter and topic joined with a single space,
    /// exactly as typed. Zero retrieved passages is not an error: generation
    /// proceeds with an empty context.
    #[instrument(skip(self), fields(chapter = %chapter, topic = %topic))]
    pub async fn generate(&self, chapter: &str, topic: &str, count: u8) -> Result<String> {
        let query = format!("{} {}", chapter, topic);

        let snippets = self.retriever.search(&query).await?;
        info!("Retrieved {} passages for '{}'", snippets.len(), query);

        let context = join_context(&snippets);
        self.generator.generate(count, &context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_index::IndexMatch;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingEmbedder {
        pub calls: AtomicUsize,
        pub queries: Mutex<Vec<String>>,
    }

    impl CountingEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(text.to_string());
            Ok(vec![0.0; 4])
        }

        fn dimensions(&self) -> usize {
            4
        }
    }

    struct FixedIndex {
        pub texts: Vec<&'static str>,
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        async fn query(&self, _vector: &[f32], top_k: usize) -> Result<Vec<IndexMatch>> {
            Ok(self
                .texts
                .iter()
                .take(top_k)
                .enumerate()
                .map(|(i, text)| {
                    let mut metadata = serde_json::Map::new();
                    metadata.insert("text".to_string(), serde_json::json!(text));
                    IndexMatch {
                        id: i.to_string(),
                        score: 0.9,
                        metadata,
                    }
                })
                .collect())
        }
    }

    struct RecordingModel {
        pub prompts: Mutex<Vec<String>>,
    }

    impl RecordingModel {
        fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("<html>generated</html>".to_string())
        }
    }

    fn pipeline(
        texts: Vec<&'static str>,
    ) -> (Pipeline, Arc<CountingEmbedder>, Arc<RecordingModel>) {
        let embedder = Arc::new(CountingEmbedder::new());
        let model = Arc::new(RecordingModel::new());
        let pipeline = Pipeline::with_components(
            Settings::default(),
            Prompts::default(),
            embedder.clone(),
            Arc::new(FixedIndex { texts }),
            model.clone(),
        );
        (pipeline, embedder, model)
    }

    #[tokio::test]
    async fn test_generate_end_to_end() {
        let (pipeline, embedder, model) = pipeline(vec!["তাপ শক্তির একটি রূপ", "শক্তির নিত্যতা"]);

        let html = pipeline.generate("তাপগতিবিদ্যা", "প্রথম সূত্র", 3).await.unwrap();
        assert_eq!(html, "<html>generated</html>");

        // Query is chapter and topic joined with a single space.
        let queries = embedder.queries.lock().unwrap();
        assert_eq!(queries.as_slice(), ["তাপগতিবিদ্যা প্রথম সূত্র"]);

        // Count and the blank-line-joined context reach the prompt.
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Generate EXACTLY 3 Bengali MCQs"));
        assert!(prompts[0].contains("তাপ শক্তির একটি রূপ\n\nশক্তির নিত্যতা"));
    }

    #[tokio::test]
    async fn test_generate_with_no_matches_uses_empty_context() {
        let (pipeline, _embedder, model) = pipeline(vec![]);

        let html = pipeline.generate("অধ্যায়", "বিষয়", 5).await.unwrap();
        assert_eq!(html, "<html>generated</html>");

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Use this reference context:\n\n"));
    }

    #[tokio::test]
    async fn test_search_bounded_by_configured_top_k() {
        let (pipeline, _embedder, _model) =
            pipeline(vec!["a", "b", "c", "d", "e", "f", "g", "h"]);

        // Settings default top_k is 5.
        let results = pipeline.search("query").await.unwrap();
        assert_eq!(results.len(), 5);
    }
}
