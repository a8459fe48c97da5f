//! In-memory provider for defaults

use std::collections::HashMap;

use crate::cache::MemoCache;

use super::traits::{Lookup, Provider};

/// In-memory provider, usually placed last to supply fallback defaults
///
/// Backed by its own [`MemoCache`] used as a plain concurrent map. Keys that
/// were never set are reported as missing.
///
/// # Thread Safety
///
/// `set` may be called concurrently with lookups from any thread.
///
/// # Example
///
/// ```
/// use cfgchain_core::providers::{MemoryProvider, Provider};
///
/// let defaults = MemoryProvider::new();
/// defaults.set("PORT", "8080");
/// assert!(defaults.lookup("PORT").is_found());
/// assert!(defaults.lookup("HOST").is_missing());
/// ```
#[derive(Debug, Default)]
pub struct MemoryProvider {
    values: MemoCache,
}

impl MemoryProvider {
    /// Create a new empty memory provider
    pub fn new() -> Self {
        Self {
            values: MemoCache::new(),
        }
    }

    /// Create a memory provider with initial values
    pub fn with_values<I, K, V>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let provider = Self::new();
        for (key, value) in initial {
            provider.set(key.as_ref(), value.as_ref());
        }
        provider
    }

    /// Install a value, replacing any previous one
    pub fn set(&self, key: &str, value: &str) {
        self.values.set(key, value);
    }

    /// Check whether a value is set for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains(key)
    }

    /// Number of values held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no values are held
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for MemoryProvider {
    fn from(values: HashMap<String, String>) -> Self {
        Self::with_values(values)
    }
}

impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn lookup(&self, key: &str) -> Lookup {
        match self.values.peek(key) {
            Some(value) => Lookup::Found(value),
            None => Lookup::Missing,
        }
    }
}
