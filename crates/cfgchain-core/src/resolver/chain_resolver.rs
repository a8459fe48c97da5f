//! Resolver walking an ordered provider chain behind a memoizing cache

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, trace, warn};

use crate::cache::MemoCache;
use crate::providers::{
    EnvProvider, Lookup, MemoryProvider, Provider, SecretsDirProvider, DEFAULT_SECRETS_DIR,
};

use super::error::{ResolveError, ResolveResult};

/// A value together with the provider that supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The value
    pub value: String,
    /// Name of the provider that supplied it
    pub source: String,
}

/// Process-wide resolver for callers that do not thread one through
static GLOBAL: Lazy<Resolver> = Lazy::new(Resolver::standard);

/// Resolves keys by asking providers in order
///
/// The first provider reporting [`Lookup::Found`] wins. [`Lookup::Missing`]
/// moves on to the next provider, and [`Lookup::Failed`] aborts the walk
/// and is returned to the caller. When every provider misses, the result
/// is [`ResolveError::KeyMissing`].
///
/// Successful results are memoized per key, so later calls for the same key
/// do not touch any provider. Misses and failures are never cached.
///
/// Providers are called with no resolver lock held.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cfgchain_core::providers::MemoryProvider;
/// use cfgchain_core::Resolver;
///
/// let resolver = Resolver::builder()
///     .env()
///     .defaults(Arc::new(MemoryProvider::new()))
///     .build();
///
/// resolver.set_default("CFGCHAIN_DOC_LISTEN", "0.0.0.0:8080");
/// assert_eq!(resolver.resolve("CFGCHAIN_DOC_LISTEN").unwrap(), "0.0.0.0:8080");
/// ```
pub struct Resolver {
    providers: Vec<Arc<dyn Provider>>,
    cache: MemoCache,
    defaults: Option<Arc<MemoryProvider>>,
}

impl Resolver {
    /// Create a resolver over `providers`, tried in the given order
    ///
    /// A resolver built this way has no defaults handle; use
    /// [`Resolver::builder`] to register one.
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self {
            providers,
            cache: MemoCache::new(),
            defaults: None,
        }
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Environment, then `/run/secrets/`, then in-memory defaults
    pub fn standard() -> Self {
        Self::builder()
            .env()
            .secrets_dir(DEFAULT_SECRETS_DIR)
            .defaults(Arc::new(MemoryProvider::new()))
            .build()
    }

    /// Shared process-wide instance built with [`Resolver::standard`]
    pub fn global() -> &'static Resolver {
        &GLOBAL
    }

    /// The provider chain, in lookup order
    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    /// Names of the providers, in lookup order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// The defaults provider, if one was registered
    pub fn defaults(&self) -> Option<&Arc<MemoryProvider>> {
        self.defaults.as_ref()
    }

    /// Install a default value
    ///
    /// Has no effect on a key that has already been resolved and cached.
    /// Without a registered defaults provider this is a no-op.
    pub fn set_default(&self, key: &str, value: &str) {
        match &self.defaults {
            Some(defaults) => defaults.set(key, value),
            None => warn!(key, "set_default on a resolver without a defaults provider"),
        }
    }

    /// Resolve a key to its value
    pub fn resolve(&self, key: &str) -> ResolveResult<String> {
        if let Some(value) = self.cache.peek(key) {
            debug!(key, "cache hit");
            return Ok(value);
        }

        self.cache.get(key, |key| {
            debug!(key, "cache miss");
            self.walk(key).map(|resolved| resolved.value)
        })
    }

    /// Walk the chain without the cache, reporting which provider answered
    pub fn resolve_source(&self, key: &str) -> ResolveResult<Resolved> {
        self.walk(key)
    }

    /// Check whether a value for `key` is memoized
    pub fn is_cached(&self, key: &str) -> bool {
        self.cache.contains(key)
    }

    fn walk(&self, key: &str) -> ResolveResult<Resolved> {
        for provider in &self.providers {
            trace!(key, provider = provider.name(), "asking provider");
            match provider.lookup(key) {
                Lookup::Found(value) => {
                    debug!(key, provider = provider.name(), "value found");
                    return Ok(Resolved {
                        value,
                        source: provider.name().to_string(),
                    });
                }
                Lookup::Missing => continue,
                Lookup::Failed(source) => {
                    debug!(key, provider = provider.name(), error = %source, "provider failed, aborting");
                    return Err(ResolveError::Provider {
                        key: key.to_string(),
                        source,
                    });
                }
            }
        }

        debug!(key, "key not set by any provider");
        Err(ResolveError::key_missing(key))
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::standard()
    }
}

// Implement Debug manually since Arc<dyn Provider> doesn't implement Debug
impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("providers", &self.provider_names())
            .field("cached", &self.cache.len())
            .field("has_defaults", &self.defaults.is_some())
            .finish()
    }
}

/// Assembles a [`Resolver`] one provider at a time
///
/// Providers are consulted in the order they are added.
#[derive(Default)]
pub struct ResolverBuilder {
    providers: Vec<Arc<dyn Provider>>,
    defaults: Option<Arc<MemoryProvider>>,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any provider
    pub fn provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Append an [`EnvProvider`]
    pub fn env(self) -> Self {
        self.provider(Arc::new(EnvProvider::new()))
    }

    /// Append a [`SecretsDirProvider`] reading from `dir`
    pub fn secrets_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.provider(Arc::new(SecretsDirProvider::new(dir)))
    }

    /// Append a defaults provider and keep a handle for `set_default`
    pub fn defaults(mut self, defaults: Arc<MemoryProvider>) -> Self {
        self.defaults = Some(Arc::clone(&defaults));
        self.provider(defaults)
    }

    pub fn build(self) -> Resolver {
        Resolver {
            providers: self.providers,
            cache: MemoCache::new(),
            defaults: self.defaults,
        }
    }
}
