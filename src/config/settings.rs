//! Configuration settings for Prosno.

use crate::error::{ProsnoError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the vector service API key.
///
/// One key covers both the index and its hosted embedding endpoint.
pub const INDEX_KEY_VAR: &str = "PINECONE_API_KEY";

/// Environment variable holding the language model API key.
pub const MODEL_KEY_VAR: &str = "GROQ_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub embedding: EmbeddingSettings,
    pub vector_index: VectorIndexSettings,
    pub retrieval: RetrievalSettings,
    pub generation: GenerationSettings,
    pub prompts: PromptSettings,
}

/// Embedding generation settings.
///
/// Embeddings come from the vector service's hosted inference endpoint, so the
/// query vectors always match whatever model the index was populated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Base URL of the inference API.
    pub api_base: String,
    /// Embedding model to use. Must match the model used to populate the index.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.pinecone.io".to_string(),
            model: "multilingual-e5-large".to_string(),
            dimensions: 1024,
        }
    }
}

/// Vector index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorIndexSettings {
    /// Name of the pre-populated index.
    pub index_name: String,
    /// Data-plane host URL of the index (e.g. "https://nctb-physics-xxxx.svc.us-east-1-aws.pinecone.io").
    pub host: String,
}

impl Default for VectorIndexSettings {
    fn default() -> Self {
        Self {
            index_name: "nctb-physics".to_string(),
            host: String::new(),
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of passages to retrieve per query.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// MCQ generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Base URL of the OpenAI-compatible chat completions API.
    pub api_base: String,
    /// LLM model for MCQ generation.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.2,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

/// API credentials, read from the environment at startup.
///
/// No `Debug` impl, so key material cannot end up in logs.
#[derive(Clone)]
pub struct Credentials {
    /// Vector service key (index queries and hosted embeddings).
    pub index_api_key: String,
    /// Language model service key.
    pub model_api_key: String,
}

impl Credentials {
    /// Read both required credentials from the environment.
    ///
    /// A missing or empty key is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            index_api_key: required_var(INDEX_KEY_VAR)?,
            model_api_key: required_var(MODEL_KEY_VAR)?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ProsnoError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ProsnoError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("prosno")
            .join("config.toml")
    }

    /// Get the index host, failing if it has not been configured.
    pub fn index_host(&self) -> Result<&str> {
        if self.vector_index.host.is_empty() {
            return Err(ProsnoError::Config(format!(
                "vector_index.host is not configured for index '{}'. \
                 Set it in the config file (prosno config edit).",
                self.vector_index.index_name
            )));
        }
        Ok(&self.vector_index.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.vector_index.index_name, "nctb-physics");
        assert_eq!(settings.retrieval.top_k, 5);
        assert_eq!(settings.generation.model, "llama-3.1-8b-instant");
        assert_eq!(settings.embedding.dimensions, 1024);
    }

    #[test]
    fn test_index_host_unconfigured() {
        let settings = Settings::default();
        assert!(settings.index_host().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/prosno/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.generation.temperature, 0.2);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.vector_index.host = "https://example.svc.pinecone.io".to_string();
        settings.retrieval.top_k = 8;
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(reloaded.vector_index.host, "https://example.svc.pinecone.io");
        assert_eq!(reloaded.retrieval.top_k, 8);
    }
}
