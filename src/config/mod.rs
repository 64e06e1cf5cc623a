//! Configuration module for Prosno.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{McqPrompts, Prompts};
pub use settings::{
    Credentials, EmbeddingSettings, GenerationSettings, PromptSettings, RetrievalSettings,
    Settings, VectorIndexSettings, INDEX_KEY_VAR, MODEL_KEY_VAR,
};
