//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::{Settings, INDEX_KEY_VAR, MODEL_KEY_VAR};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Prosno Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    let mut checks = Vec::new();

    // Check API keys
    println!("{}", style("API Configuration").bold());
    checks.push(check_api_key(INDEX_KEY_VAR));
    checks.push(check_api_key(MODEL_KEY_VAR));
    for check in &checks {
        check.print();
    }

    println!();

    // Check index configuration
    println!("{}", style("Vector Index").bold());
    let index_checks = check_index(settings);
    for check in &index_checks {
        check.print();
    }
    checks.extend(index_checks);

    println!();

    // Check configuration
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Prosno.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Prosno is ready to use.");
    }

    Ok(())
}

/// Check if an API key is configured, showing a masked preview.
fn check_api_key(name: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(key) if key.len() > 8 => {
            let masked = format!("{}...{}", &key[..4], &key[key.len() - 4..]);
            CheckResult::ok(name, &format!("configured ({})", masked))
        }
        Ok(key) if !key.is_empty() => CheckResult::warning(
            name,
            "set but unusually short",
            "Double-check the key value",
        ),
        Ok(_) => CheckResult::error(
            name,
            "empty",
            &format!("Set with: export {}='...'", name),
        ),
        Err(_) => CheckResult::error(
            name,
            "not set",
            &format!("Set with: export {}='...'", name),
        ),
    }
}

/// Check index configuration.
fn check_index(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    results.push(CheckResult::ok(
        "Index name",
        &settings.vector_index.index_name,
    ));

    if settings.vector_index.host.is_empty() {
        results.push(CheckResult::error(
            "Index host",
            "not configured",
            "Set vector_index.host in the config file (prosno config edit)",
        ));
    } else {
        results.push(CheckResult::ok("Index host", &settings.vector_index.host));
    }

    results
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: prosno init (or prosno config edit)",
        )
    }
}
