//! Resolution error types

use thiserror::Error;

use crate::convert::ConvertError;
use crate::providers::ProviderError;

/// Errors returned by [`Resolver::resolve`](super::Resolver::resolve)
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No provider had a value for the key. This is an ordinary outcome.
    #[error("key not set: {key}")]
    KeyMissing { key: String },

    /// A provider failed hard and resolution was aborted
    #[error("resolving {key:?}: {source}")]
    Provider {
        key: String,
        #[source]
        source: ProviderError,
    },
}

impl ResolveError {
    pub fn key_missing(key: impl Into<String>) -> Self {
        Self::KeyMissing { key: key.into() }
    }

    /// True when no provider had the key
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::KeyMissing { .. })
    }

    /// The key that failed to resolve
    pub fn key(&self) -> &str {
        match self {
            Self::KeyMissing { key } | Self::Provider { key, .. } => key,
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors returned by the typed accessors
#[derive(Error, Debug)]
pub enum AccessError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The resolved string could not be converted. The raw value is kept
    /// on the struct but left out of the message since it may be a secret.
    #[error("converting {key:?} to {target}: {source}")]
    Conversion {
        key: String,
        target: &'static str,
        value: String,
        #[source]
        source: ConvertError,
    },
}

impl AccessError {
    /// True when the underlying cause is a missing key
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Resolve(err) if err.is_missing())
    }
}

pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_missing_display() {
        let err = ResolveError::key_missing("PORT");
        assert!(err.is_missing());
        assert_eq!(err.key(), "PORT");
        assert_eq!(err.to_string(), "key not set: PORT");
    }

    #[test]
    fn test_provider_error_display() {
        let err = ResolveError::Provider {
            key: "db".to_string(),
            source: ProviderError::other("vault", "sealed"),
        };
        assert!(!err.is_missing());
        assert_eq!(err.key(), "db");
        assert_eq!(err.to_string(), "resolving \"db\": vault provider error: sealed");
    }

    #[test]
    fn test_conversion_error_hides_value() {
        let err = AccessError::Conversion {
            key: "TOKEN".to_string(),
            target: "int",
            value: "s3cr3t".to_string(),
            source: ConvertError::InvalidSyntax,
        };
        let message = err.to_string();
        assert!(!message.contains("s3cr3t"));
        assert_eq!(message, "converting \"TOKEN\" to int: invalid syntax");
        assert!(!err.is_missing());
    }

    #[test]
    fn test_access_error_from_missing() {
        let err = AccessError::from(ResolveError::key_missing("X"));
        assert!(err.is_missing());
    }
}
