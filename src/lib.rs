//! Prosno - RAG-based MCQ generation
//!
//! A CLI and web tool that generates interactive multiple-choice questions from
//! an indexed physics textbook corpus.
//!
//! The name "Prosno" comes from the Bengali word for "question."
//!
//! # Overview
//!
//! Prosno allows you to:
//! - Generate interactive HTML quizzes for any chapter and topic
//! - Ground every question in passages retrieved from a vector index
//! - Serve a browser UI for students, or run one-shot from the terminal
//! - Inspect what the retriever finds for a given query
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt template management
//! - `embedding` - Query embedding generation
//! - `vector_index` - Managed vector index client
//! - `mcq` - Retrieval and MCQ generation
//! - `pipeline` - End-to-end pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use prosno::config::Settings;
//! use prosno::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     // Generate 5 MCQs on the first law of thermodynamics
//!     let html = pipeline.generate("তাপগতিবিদ্যা", "প্রথম সূত্র", 5).await?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod mcq;
pub mod openai;
pub mod pipeline;
pub mod vector_index;

pub use error::{ProsnoError, Result};
