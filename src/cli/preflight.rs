//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are available before starting
//! operations that would otherwise fail midway.

use crate::config::{INDEX_KEY_VAR, MODEL_KEY_VAR};
use crate::error::{ProsnoError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Generation needs the index key and the model key.
    Generate,
    /// Search needs only the index key.
    Search,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Generate => {
            check_key(INDEX_KEY_VAR)?;
            check_key(MODEL_KEY_VAR)?;
        }
        Operation::Search => {
            check_key(INDEX_KEY_VAR)?;
        }
    }
    Ok(())
}

/// Check that an API key environment variable is set and non-empty.
fn check_key(name: &str) -> Result<()> {
    match std::env::var(name) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(ProsnoError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            name, name
        ))),
        Err(_) => Err(ProsnoError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            name, name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key_missing() {
        assert!(check_key("PROSNO_TEST_KEY_THAT_DOES_NOT_EXIST").is_err());
    }
}
