//! File-based resolver configuration (YAML)

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::providers::{MemoryProvider, DEFAULT_SECRETS_DIR};
use crate::resolver::Resolver;

use super::error::{ConfigError, ConfigResult};

/// A provider entry in the configured chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Process environment variables
    Env,
    /// Files in `secrets_dir`
    Secrets,
    /// Values from the `defaults` table
    Defaults,
}

/// Configuration file structure
///
/// ```yaml
/// providers: [env, secrets, defaults]
/// secrets_dir: /run/secrets/
/// defaults:
///   PORT: 8080
///   LOG_FORMAT: json
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Provider chain, highest priority first
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderKind>,

    /// Directory read by the `secrets` provider
    #[serde(default = "default_secrets_dir")]
    pub secrets_dir: PathBuf,

    /// Values served by the `defaults` provider
    #[serde(default, deserialize_with = "scalar_map")]
    pub defaults: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            secrets_dir: default_secrets_dir(),
            defaults: BTreeMap::new(),
        }
    }
}

fn default_providers() -> Vec<ProviderKind> {
    vec![ProviderKind::Env, ProviderKind::Secrets, ProviderKind::Defaults]
}

fn default_secrets_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SECRETS_DIR)
}

// Accept unquoted numbers and booleans as default values.
fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw: BTreeMap<String, serde_yaml::Value> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(D::Error::custom(format!(
                        "default for {:?} must be a string, number or boolean",
                        key
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

impl ConfigFile {
    /// User-level config path (`~/.config/cfgchain/config.yaml`)
    pub fn user_path() -> PathBuf {
        // Use XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("cfgchain").join("config.yaml")
    }

    /// Workspace-level config path (`<root>/.config/cfgchain/config.yaml`)
    pub fn workspace_path(workspace_root: impl AsRef<Path>) -> PathBuf {
        workspace_root
            .as_ref()
            .join(".config")
            .join("cfgchain")
            .join("config.yaml")
    }

    /// Load a config file; a file that does not exist yields the default
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the first config that exists: workspace level, then user level
    ///
    /// Returns the path that was used, if any.
    pub fn discover(workspace_root: impl AsRef<Path>) -> ConfigResult<(Self, Option<PathBuf>)> {
        for path in [Self::workspace_path(workspace_root), Self::user_path()] {
            if path.is_file() {
                debug!(path = %path.display(), "using config file");
                return Ok((Self::load(&path)?, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Parse YAML text
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Check the provider chain is usable
    pub fn validate(&self) -> ConfigResult<()> {
        if self.providers.is_empty() {
            return Err(ConfigError::Invalid("provider list is empty".to_string()));
        }

        let defaults_entries = self
            .providers
            .iter()
            .filter(|p| **p == ProviderKind::Defaults)
            .count();
        if defaults_entries > 1 {
            return Err(ConfigError::Invalid(
                "defaults provider listed more than once".to_string(),
            ));
        }

        Ok(())
    }

    /// Assemble a resolver following this configuration
    pub fn build(&self) -> ConfigResult<Resolver> {
        self.validate()?;

        let mut builder = Resolver::builder();
        for kind in &self.providers {
            builder = match kind {
                ProviderKind::Env => builder.env(),
                ProviderKind::Secrets => builder.secrets_dir(&self.secrets_dir),
                ProviderKind::Defaults => {
                    builder.defaults(Arc::new(MemoryProvider::with_values(&self.defaults)))
                }
            };
        }

        if !self.defaults.is_empty() && !self.providers.contains(&ProviderKind::Defaults) {
            warn!(
                count = self.defaults.len(),
                "defaults configured but no defaults provider in the chain"
            );
        }

        Ok(builder.build())
    }
}
