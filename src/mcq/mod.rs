//! Retrieval-augmented MCQ generation.
//!
//! Ties query embedding, index lookup, and prompt-driven generation together.

pub mod generator;
pub mod retriever;

pub use generator::{ChatModel, CompletionModel, McqGenerator};
pub use retriever::{join_context, Retriever};

/// Smallest number of MCQs a request may ask for.
pub const MIN_COUNT: u8 = 1;

/// Largest number of MCQs a request may ask for.
pub const MAX_COUNT: u8 = 20;

/// Default number of MCQs when a request does not say.
pub const DEFAULT_COUNT: u8 = 5;
