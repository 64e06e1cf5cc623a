//! Generate command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::ProsnoError;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the generate command.
pub async fn run_generate(
    chapter: &str,
    topic: &str,
    count: u8,
    top_k: Option<usize>,
    output: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Empty chapter or topic never reaches the pipeline.
    if chapter.trim().is_empty() || topic.trim().is_empty() {
        let err = ProsnoError::InvalidInput(
            "Please enter both chapter and topic.".to_string(),
        );
        Output::error(&err.to_string());
        return Err(err.into());
    }

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        Output::info("Run 'prosno doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(k) = top_k {
        settings.retrieval.top_k = k;
    }

    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Generating MCQs...");

    match pipeline.generate(chapter, topic, count).await {
        Ok(html) => {
            spinner.finish_and_clear();

            match output {
                Some(path) => {
                    std::fs::write(&path, &html)?;
                    Output::success(&format!("Saved generated MCQs to {}", path));
                }
                None => {
                    println!("{}", html);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate MCQs: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
