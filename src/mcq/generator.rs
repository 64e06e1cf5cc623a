//! MCQ generation via a single-turn chat completion.

use crate::config::Prompts;
use crate::error::{ProsnoError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Trait for single-turn prompt completion.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send a fully rendered prompt and return the raw text response.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Chat-completions model behind an OpenAI-compatible endpoint.
pub struct ChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl ChatModel {
    /// Create a new model client for the given endpoint.
    pub fn new(api_base: &str, api_key: &str, model: &str, temperature: f32) -> Self {
        Self {
            client: create_client(api_base, api_key),
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl CompletionModel for ChatModel {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| ProsnoError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| ProsnoError::Generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ProsnoError::Generation(format!("Chat completion failed: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .cloned()
            .ok_or_else(|| ProsnoError::Generation("Empty response from LLM".to_string()))
    }
}

/// Generates interactive MCQ documents from retrieved context.
pub struct McqGenerator {
    model: Arc<dyn CompletionModel>,
    template: String,
}

impl McqGenerator {
    /// Create a new generator over a completion model.
    pub fn new(model: Arc<dyn CompletionModel>, prompts: &Prompts) -> Self {
        Self {
            model,
            template: prompts.mcq.template.clone(),
        }
    }

    /// Render the generation prompt for a count and context.
    pub fn render_prompt(&self, count: u8, context: &str) -> String {
        let n = count.to_string();
        Prompts::render(&self.template, &[("n", n.as_str()), ("context", context)])
    }

    /// Generate `count` MCQs grounded in `context`.
    ///
    /// `count` is expected to already be within bounds; the CLI and HTTP
    /// boundaries enforce that. The model's response is returned unmodified:
    /// no HTML well-formedness check, no count verification.
    #[instrument(skip(self, context))]
    pub async fn generate(&self, count: u8, context: &str) -> Result<String> {
        if context.is_empty() {
            debug!("No grounding context, generating best-effort");
        }

        let prompt = self.render_prompt(count, context);
        let html = self.model.complete(&prompt).await?;

        info!("Generated MCQ document ({} bytes)", html.len());
        Ok(html)
    }
}
