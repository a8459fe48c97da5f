//! Configuration value providers
//!
//! This module provides the provider side of resolution:
//! - `Provider` trait for implementing custom sources
//! - `Lookup` outcome distinguishing found, missing and failed
//! - Built-in implementations: `EnvProvider`, `SecretsDirProvider`, `MemoryProvider`

mod traits;
mod error;
mod env;
mod secrets_dir;
mod memory;

pub use traits::{Provider, Lookup};
pub use error::{ProviderError, ProviderResult};
pub use env::EnvProvider;
pub use secrets_dir::{SecretsDirProvider, DEFAULT_SECRETS_DIR};
pub use memory::MemoryProvider;
