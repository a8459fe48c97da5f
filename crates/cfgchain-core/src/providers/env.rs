//! Environment variable provider

use std::env;

use super::traits::{Lookup, Provider};

/// Provider that reads process environment variables
///
/// The key is used verbatim as the variable name. A variable that is unset,
/// set to the empty string, or not valid Unicode counts as missing.
///
/// # Example
///
/// ```
/// use cfgchain_core::providers::{EnvProvider, Provider};
///
/// let provider = EnvProvider::new();
/// assert!(provider.lookup("CFGCHAIN_DOC_SURELY_UNSET").is_missing());
/// ```
#[derive(Debug, Default)]
pub struct EnvProvider {
    _private: (), // Prevent direct construction, use new()
}

impl EnvProvider {
    /// Create a new environment variable provider
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Provider for EnvProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn lookup(&self, key: &str) -> Lookup {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Lookup::Found(value),
            _ => Lookup::Missing,
        }
    }
}
