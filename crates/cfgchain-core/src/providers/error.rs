//! Provider error types

use std::io;

use thiserror::Error;

/// Hard failures a provider can report
///
/// A provider returns one of these only when something unexpected happened.
/// Plain absence of a key is reported as [`Lookup::Missing`](super::Lookup::Missing)
/// instead, and never as an error.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// I/O error while reading a value
    #[error("{provider} provider failed to read {key:?}: {source}")]
    Io {
        provider: String,
        key: String,
        #[source]
        source: io::Error,
    },

    /// Other error
    #[error("{provider} provider error: {message}")]
    Other { provider: String, message: String },
}

impl ProviderError {
    /// Create an I/O error
    pub fn io(provider: impl Into<String>, key: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            provider: provider.into(),
            key: key.into(),
            source,
        }
    }

    /// Create a free-form error, mostly for custom providers
    pub fn other(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Name of the provider that failed
    pub fn provider(&self) -> &str {
        match self {
            Self::Io { provider, .. } | Self::Other { provider, .. } => provider,
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
