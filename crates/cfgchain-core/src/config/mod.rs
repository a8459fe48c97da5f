//! Resolver configuration
//!
//! A resolver chain can be described in a YAML file at the user level
//! (`~/.config/cfgchain/config.yaml`) or the workspace level
//! (`.config/cfgchain/config.yaml`).

mod error;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, ProviderKind};
