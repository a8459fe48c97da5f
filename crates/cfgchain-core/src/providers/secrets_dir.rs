//! Secrets-directory provider
//!
//! Reads one file per key from a directory, the layout used by container
//! secret mounts such as `/run/secrets/<name>`.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::error::ProviderError;
use super::traits::{Lookup, Provider};

/// Default secrets mount point
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets/";

/// Provider that reads values from files in a secrets directory
///
/// The value for `key` is the content of `<dir>/<key>` with surrounding
/// whitespace trimmed. A file that does not exist (or a directory that does
/// not exist) counts as missing. Any other I/O error, including content that
/// is not valid UTF-8, is a hard failure.
///
/// Only keys that name a single file directly inside the directory are
/// looked up. Absolute paths, `..`, `.` and nested paths count as missing.
///
/// # Example
///
/// ```no_run
/// use cfgchain_core::providers::{Provider, SecretsDirProvider};
///
/// let provider = SecretsDirProvider::new("/run/secrets");
/// let db_password = provider.lookup("db_password");
/// ```
#[derive(Debug, Clone)]
pub struct SecretsDirProvider {
    dir: PathBuf,
}

impl SecretsDirProvider {
    /// Create a provider reading from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this provider reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for `key`, if `key` is a plain file name
    fn secret_path(&self, key: &str) -> Option<PathBuf> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if *name == *key => Some(self.dir.join(name)),
            _ => None,
        }
    }

    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let Some(path) = self.secret_path(key) else {
            return Ok(None);
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let content = String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(content.trim().to_string()))
    }
}

impl Default for SecretsDirProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_DIR)
    }
}

impl Provider for SecretsDirProvider {
    fn name(&self) -> &str {
        "secrets"
    }

    fn lookup(&self, key: &str) -> Lookup {
        self.read(key)
            .map_err(|e| ProviderError::io(self.name(), key, e))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_secrets_provider_name() {
        assert_eq!(SecretsDirProvider::default().name(), "secrets");
        assert_eq!(SecretsDirProvider::default().dir(), Path::new(DEFAULT_SECRETS_DIR));
    }

    #[test]
    fn test_secrets_provider_reads_trimmed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("db_password"), "  hunter2\n").unwrap();

        let provider = SecretsDirProvider::new(dir.path());
        assert_eq!(
            provider.lookup("db_password").into_result().unwrap(),
            Some("hunter2".to_string())
        );
    }

    #[test]
    fn test_secrets_provider_missing_file() {
        let dir = TempDir::new().unwrap();
        let provider = SecretsDirProvider::new(dir.path());
        assert!(provider.lookup("absent").is_missing());
    }

    #[test]
    fn test_secrets_provider_missing_dir() {
        let dir = TempDir::new().unwrap();
        let provider = SecretsDirProvider::new(dir.path().join("does-not-exist"));
        assert!(provider.lookup("anything").is_missing());
    }

    #[test]
    fn test_secrets_provider_directory_is_failure() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let provider = SecretsDirProvider::new(dir.path());
        match provider.lookup("nested") {
            Lookup::Failed(ProviderError::Io { provider, key, .. }) => {
                assert_eq!(provider, "secrets");
                assert_eq!(key, "nested");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_secrets_provider_invalid_utf8_is_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("binary"), b"\xff\xfe\xfd").unwrap();

        let provider = SecretsDirProvider::new(dir.path());
        match provider.lookup("binary") {
            Lookup::Failed(ProviderError::Io { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_secrets_provider_absolute_key_stays_inside() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let host_file = outside.path().join("host_secret");
        fs::write(&host_file, "leaked\n").unwrap();

        let provider = SecretsDirProvider::new(dir.path());
        let key = host_file.to_str().unwrap();
        assert!(provider.lookup(key).is_missing());
    }

    #[test]
    fn test_secrets_provider_rejects_non_file_names() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("secrets");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(root.path().join("sibling"), "outside").unwrap();
        fs::write(dir.join("nested").join("inner"), "deep").unwrap();

        let provider = SecretsDirProvider::new(&dir);
        for key in ["../sibling", "nested/inner", "./nested", "nested/", "..", "", "/"] {
            assert!(provider.lookup(key).is_missing(), "{:?}", key);
        }
    }

    #[test]
    fn test_secrets_provider_empty_file_is_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blank"), "\n").unwrap();

        let provider = SecretsDirProvider::new(dir.path());
        assert_eq!(
            provider.lookup("blank").into_result().unwrap(),
            Some(String::new())
        );
    }
}
