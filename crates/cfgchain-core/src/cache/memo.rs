//! Concurrent string-to-string memoizing store

use std::collections::HashMap;

use parking_lot::RwLock;

/// Concurrent memoizing store with fill-on-miss
///
/// Reads take a shared lock, writes an exclusive one. The compute callback
/// passed to [`MemoCache::get`] runs with no lock held, so it may freely
/// touch other caches (or even this one).
///
/// # Concurrency
///
/// The read-then-write sequence in `get` is not atomic. Two callers missing
/// the same key at the same time will both run `compute`, and the last
/// successful writer wins. Compute functions must therefore be idempotent
/// for a given key.
///
/// # Example
///
/// ```
/// use cfgchain_core::cache::MemoCache;
///
/// let cache = MemoCache::new();
/// let value: Result<String, ()> = cache.get("port", |_| Ok("8080".to_string()));
/// assert_eq!(value, Ok("8080".to_string()));
/// assert!(cache.contains("port"));
/// ```
#[derive(Debug, Default)]
pub struct MemoCache {
    data: RwLock<HashMap<String, String>>,
}

impl MemoCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Store a value, overwriting any existing entry
    pub fn set(&self, key: &str, value: &str) {
        self.data.write().insert(key.to_string(), value.to_string());
    }

    /// Return the cached value for `key`, computing it on a miss
    ///
    /// On a miss `compute(key)` is invoked outside the lock. A successful
    /// result is stored before it is returned; an error is returned as-is
    /// and nothing is stored, so the next call computes again.
    pub fn get<E, F>(&self, key: &str, compute: F) -> Result<String, E>
    where
        F: FnOnce(&str) -> Result<String, E>,
    {
        if let Some(value) = self.peek(key) {
            return Ok(value);
        }

        let value = compute(key)?;
        self.set(key, &value);
        Ok(value)
    }

    /// Return the cached value without computing anything
    pub fn peek(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    /// Check whether a value is cached for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_set_overwrites() {
        let cache = MemoCache::new();
        cache.set("key", "first");
        cache.set("key", "second");

        assert_eq!(cache.peek("key"), Some("second".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_computes_once_on_success() {
        let cache = MemoCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<String, ()> = cache.get("key", |k| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(format!("{}-value", k))
            });
            assert_eq!(value, Ok("key-value".to_string()));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_get_does_not_store_failures() {
        let cache = MemoCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..4 {
            let value: Result<String, &str> = cache.get("missing", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("nope")
            });
            assert_eq!(value, Err("nope"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(!cache.contains("missing"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_returns_preset_value() {
        let cache = MemoCache::new();
        cache.set("key", "preset");

        let value: Result<String, ()> = cache.get("key", |_| panic!("should not compute"));
        assert_eq!(value, Ok("preset".to_string()));
    }

    #[test]
    fn test_compute_may_reenter_cache() {
        let cache = MemoCache::new();
        cache.set("base", "8000");

        // No lock is held while computing, so this must not deadlock.
        let value: Result<String, ()> = cache.get("derived", |_| {
            Ok(cache.peek("base").unwrap_or_default())
        });
        assert_eq!(value, Ok("8000".to_string()));
        assert!(cache.contains("derived"));
    }

    #[test]
    fn test_concurrent_first_access() {
        let cache = Arc::new(MemoCache::new());
        let barrier = Arc::new(Barrier::new(8));
        let mut handles = vec![];

        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                cache.get::<(), _>("shared", |_| Ok("value".to_string()))
            }));
        }

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok("value".to_string()));
        }
        assert_eq!(cache.len(), 1);
    }
}
