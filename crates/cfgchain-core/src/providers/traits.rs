//! Provider trait and lookup outcome

use super::error::ProviderError;

/// Outcome of asking a single provider for a key
#[derive(Debug)]
pub enum Lookup {
    /// The provider holds a value for the key
    Found(String),
    /// The provider has no value; the next provider should be asked
    Missing,
    /// The provider failed; resolution must stop here
    Failed(ProviderError),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    /// Convert into the `Result<Option<_>>` shape
    pub fn into_result(self) -> Result<Option<String>, ProviderError> {
        match self {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Missing => Ok(None),
            Lookup::Failed(err) => Err(err),
        }
    }
}

impl From<Result<Option<String>, ProviderError>> for Lookup {
    fn from(result: Result<Option<String>, ProviderError>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::Missing,
            Err(err) => Lookup::Failed(err),
        }
    }
}

/// Read-only source of configuration values
///
/// Implementations:
/// - `EnvProvider`: process environment variables
/// - `SecretsDirProvider`: one file per key in a secrets directory
/// - `MemoryProvider`: programmatically set defaults
/// - Custom implementations (remote stores, test stubs, etc.)
///
/// # Contract
///
/// `lookup` must be side-effect free and idempotent for a given key, and
/// safe to call from many threads at once. Report absence as
/// [`Lookup::Missing`]; reserve [`Lookup::Failed`] for real failures,
/// since a failure aborts resolution for every provider after this one.
///
/// # Example
///
/// ```
/// use cfgchain_core::providers::{Lookup, Provider};
///
/// #[derive(Debug)]
/// struct Fixed;
///
/// impl Provider for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn lookup(&self, key: &str) -> Lookup {
///         match key {
///             "PORT" => Lookup::Found("8080".to_string()),
///             _ => Lookup::Missing,
///         }
///     }
/// }
///
/// assert!(Fixed.lookup("PORT").is_found());
/// ```
pub trait Provider: Send + Sync {
    /// Short human-readable name of this provider
    fn name(&self) -> &str;

    /// Look up a value by key
    fn lookup(&self, key: &str) -> Lookup;
}
