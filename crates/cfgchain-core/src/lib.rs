//! cfgchain core
//!
//! Configuration-value resolution from an ordered list of providers.
//! A key is looked up in each provider in turn; the first value found wins
//! and is memoized. Absence and failure are kept apart: a provider that
//! merely lacks a key lets the next provider answer, while a provider that
//! fails aborts the lookup.
//!
//! ```rust,no_run
//! use cfgchain_core::Resolver;
//!
//! // env vars, then /run/secrets/<key>, then programmatic defaults
//! let config = Resolver::standard();
//! config.set_default("PORT", "8080");
//!
//! let port = config.get_int("PORT")?;
//! let db_password = config.must_string("DB_PASSWORD");
//! # Ok::<(), cfgchain_core::AccessError>(())
//! ```

pub mod cache;
pub mod providers;
pub mod resolver;
pub mod convert;
pub mod config;

// Re-export commonly used types
pub use cache::MemoCache;

pub use providers::{
    Provider, Lookup, ProviderError, ProviderResult,
    EnvProvider, SecretsDirProvider, MemoryProvider, DEFAULT_SECRETS_DIR,
};

pub use resolver::{
    Resolver, ResolverBuilder, Resolved,
    ResolveError, ResolveResult, AccessError, AccessResult,
};

pub use convert::ConvertError;

pub use config::{ConfigFile, ConfigError, ConfigResult, ProviderKind};
