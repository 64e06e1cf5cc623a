//! Init command - interactive first-run setup.

use crate::cli::Output;
use crate::config::{Settings, INDEX_KEY_VAR, MODEL_KEY_VAR};
use console::style;
use std::io::{self, Write};

/// Run the init command for first-time setup.
pub fn run_init(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Prosno Setup");
    println!();
    println!("Welcome to Prosno! Let's make sure everything is configured correctly.\n");

    // Step 1: Check API keys
    println!("{}", style("Step 1: Checking API credentials").bold().cyan());
    println!();

    let missing: Vec<&str> = [INDEX_KEY_VAR, MODEL_KEY_VAR]
        .into_iter()
        .filter(|var| std::env::var(var).map(|v| v.is_empty()).unwrap_or(true))
        .collect();

    if !missing.is_empty() {
        Output::warning("Some credentials are missing:");
        println!();
        for var in &missing {
            println!("  {} {} - not set", style("✗").red(), style(var).bold());
        }
        println!();
        println!("  Prosno needs the vector service key and the model service key.");
        println!("  Set them in your shell configuration (~/.bashrc, ~/.zshrc, etc.):");
        for var in &missing {
            println!("  {}", style(format!("export {}='...'", var)).green());
        }
        println!();

        if !prompt_continue("Continue without credentials?")? {
            println!();
            Output::info("Setup cancelled. Set the keys and run 'prosno init' again.");
            return Ok(());
        }
    } else {
        Output::success("Both API keys are configured!");
    }

    println!();

    // Step 2: Create config file
    println!("{}", style("Step 2: Configuration file").bold().cyan());
    println!();

    let config_path = Settings::default_config_path();
    if config_path.exists() {
        Output::info(&format!("Config file exists: {}", config_path.display()));
    } else if prompt_continue("Create default configuration file?")? {
        settings.save_to(&config_path)?;
        Output::success(&format!("Created config file: {}", config_path.display()));
        println!();
        println!(
            "  Set your index host with: {}",
            style("prosno config edit").green()
        );
    } else {
        Output::info("Skipped config file creation. Using defaults.");
    }

    println!();

    // Summary
    println!("{}", style("Setup Complete!").bold().green());
    println!();
    println!("Next steps:");
    println!("  {} Check configuration status", style("prosno doctor").cyan());
    println!(
        "  {} Generate your first quiz",
        style("prosno generate <chapter> <topic>").cyan()
    );
    println!("  {} Start the web UI", style("prosno serve").cyan());
    println!();
    println!("For more help: {}", style("prosno --help").cyan());

    Ok(())
}

/// Prompt user for yes/no confirmation.
fn prompt_continue(message: &str) -> io::Result<bool> {
    print!("{} {} ", style("?").cyan(), message);
    print!("{} ", style("[y/N]").dim());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_lowercase() == "y" || input.trim().to_lowercase() == "yes")
}
