//! CLI module for Prosno.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::mcq::{DEFAULT_COUNT, MAX_COUNT, MIN_COUNT};
use clap::{Parser, Subcommand};

/// Prosno - RAG-based MCQ generation
///
/// Generates interactive multiple-choice questions grounded in an indexed
/// physics textbook corpus. The name "Prosno" comes from the Bengali word
/// for "question."
#[derive(Parser, Debug)]
#[command(name = "prosno")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Prosno and verify credentials
    Init,

    /// Check credentials and configuration
    Doctor,

    /// Generate MCQs for a chapter and topic
    Generate {
        /// Chapter name (e.g. "তাপগতিবিদ্যা")
        chapter: String,

        /// Topic name (e.g. "প্রথম সূত্র")
        topic: String,

        /// Number of MCQs to generate
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT,
              value_parser = clap::value_parser!(u8).range(MIN_COUNT as i64..=MAX_COUNT as i64))]
        count: u8,

        /// Number of passages to retrieve as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Write the HTML document to a file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Search the index and print the matching passages
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Start the web UI and HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
