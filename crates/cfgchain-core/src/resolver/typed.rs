//! Typed, panicking and process-terminating accessors
//!
//! - `get_*` return the value or an error
//! - `must_*` panic on error
//! - `fatal_*` report the error once (through `tracing` when a subscriber
//!   is installed, else on stderr) and exit the process with status 1

use std::fmt::Display;
use std::process;

use tracing::error;

use crate::convert::{self, ConvertError};

use super::chain_resolver::Resolver;
use super::error::{AccessError, AccessResult, ResolveResult};

impl Resolver {
    /// Value of `key` as a string
    pub fn get_string(&self, key: &str) -> ResolveResult<String> {
        self.resolve(key)
    }

    /// Value of `key` as a boolean
    pub fn get_bool(&self, key: &str) -> AccessResult<bool> {
        self.get_converted(key, "bool", convert::parse_bool)
    }

    /// Value of `key` as a signed integer; base prefixes are honored
    pub fn get_int(&self, key: &str) -> AccessResult<i64> {
        self.get_converted(key, "int", convert::parse_int)
    }

    /// Value of `key` as a float
    pub fn get_float(&self, key: &str) -> AccessResult<f64> {
        self.get_converted(key, "float", convert::parse_float)
    }

    pub fn must_string(&self, key: &str) -> String {
        must("string", key, self.get_string(key))
    }

    pub fn must_bool(&self, key: &str) -> bool {
        must("bool", key, self.get_bool(key))
    }

    pub fn must_int(&self, key: &str) -> i64 {
        must("int", key, self.get_int(key))
    }

    pub fn must_float(&self, key: &str) -> f64 {
        must("float", key, self.get_float(key))
    }

    pub fn fatal_string(&self, key: &str) -> String {
        fatal("string", key, self.get_string(key))
    }

    pub fn fatal_bool(&self, key: &str) -> bool {
        fatal("bool", key, self.get_bool(key))
    }

    pub fn fatal_int(&self, key: &str) -> i64 {
        fatal("int", key, self.get_int(key))
    }

    pub fn fatal_float(&self, key: &str) -> f64 {
        fatal("float", key, self.get_float(key))
    }

    fn get_converted<T>(
        &self,
        key: &str,
        target: &'static str,
        parse: fn(&str) -> Result<T, ConvertError>,
    ) -> AccessResult<T> {
        let value = self.resolve(key)?;
        parse(&value).map_err(|source| AccessError::Conversion {
            key: key.to_string(),
            target,
            value,
            source,
        })
    }
}

fn must<T, E: Display>(target: &str, key: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("get {} {:?}: {}", target, key, err),
    }
}

fn fatal<T, E: Display>(target: &str, key: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            // Without a subscriber the event would be dropped
            if tracing::dispatcher::has_been_set() {
                error!(key, kind = target, error = %err, "required configuration unavailable");
            } else {
                eprintln!("get {} {:?}: {}", target, key, err);
            }
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MemoryProvider;
    use crate::resolver::ResolveError;
    use std::env;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn resolver_with(values: &[(&str, &str)]) -> Resolver {
        Resolver::builder()
            .defaults(Arc::new(MemoryProvider::with_values(values.iter().copied())))
            .build()
    }

    #[test]
    fn test_get_string() {
        let resolver = resolver_with(&[("name", "svc")]);
        assert_eq!(resolver.get_string("name").unwrap(), "svc");
        assert!(resolver.get_string("other").unwrap_err().is_missing());
    }

    #[test]
    fn test_get_bool() {
        let resolver = resolver_with(&[("on", "true"), ("off", "0"), ("bad", "yes")]);
        assert!(resolver.get_bool("on").unwrap());
        assert!(!resolver.get_bool("off").unwrap());

        match resolver.get_bool("bad") {
            Err(AccessError::Conversion { key, target, value, source }) => {
                assert_eq!(key, "bad");
                assert_eq!(target, "bool");
                assert_eq!(value, "yes");
                assert_eq!(source, ConvertError::InvalidSyntax);
            }
            other => panic!("expected conversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_int() {
        let resolver = resolver_with(&[("port", "8080"), ("mask", "0x1F"), ("bad", "12ab")]);
        assert_eq!(resolver.get_int("port").unwrap(), 8080);
        assert_eq!(resolver.get_int("mask").unwrap(), 31);
        assert!(matches!(
            resolver.get_int("bad"),
            Err(AccessError::Conversion { target: "int", .. })
        ));
    }

    #[test]
    fn test_get_float() {
        let resolver = resolver_with(&[("ratio", "0.75"), ("bad", "fast")]);
        assert_eq!(resolver.get_float("ratio").unwrap(), 0.75);
        assert!(matches!(
            resolver.get_float("bad"),
            Err(AccessError::Conversion { target: "float", .. })
        ));
    }

    #[test]
    fn test_typed_missing_key() {
        let resolver = resolver_with(&[]);
        let err = resolver.get_int("absent").unwrap_err();
        assert!(err.is_missing());
        assert!(matches!(
            err,
            AccessError::Resolve(ResolveError::KeyMissing { .. })
        ));
    }

    #[test]
    fn test_conversion_failure_keeps_string_cached() {
        let resolver = resolver_with(&[("n", "not-a-number")]);
        assert!(resolver.get_int("n").is_err());
        // The string itself resolved fine and is memoized
        assert!(resolver.is_cached("n"));
        assert_eq!(resolver.get_string("n").unwrap(), "not-a-number");
    }

    #[test]
    fn test_port_from_environment() {
        let secrets = TempDir::new().unwrap();
        env::set_var("CFGCHAIN_TEST_TYPED_PORT", "8080");

        let resolver = Resolver::builder()
            .env()
            .secrets_dir(secrets.path())
            .defaults(Arc::new(MemoryProvider::new()))
            .build();
        assert_eq!(resolver.get_int("CFGCHAIN_TEST_TYPED_PORT").unwrap(), 8080);

        env::remove_var("CFGCHAIN_TEST_TYPED_PORT");
    }

    #[test]
    fn test_empty_env_port_falls_through() {
        let secrets = TempDir::new().unwrap();
        env::set_var("CFGCHAIN_TEST_TYPED_EMPTY_PORT", "");

        let resolver = Resolver::builder()
            .env()
            .secrets_dir(secrets.path())
            .defaults(Arc::new(MemoryProvider::new()))
            .build();
        resolver.set_default("CFGCHAIN_TEST_TYPED_EMPTY_PORT", "9090");
        assert_eq!(resolver.get_int("CFGCHAIN_TEST_TYPED_EMPTY_PORT").unwrap(), 9090);

        env::remove_var("CFGCHAIN_TEST_TYPED_EMPTY_PORT");
    }

    #[test]
    fn test_must_accessors_return_values() {
        let resolver = resolver_with(&[("s", "x"), ("b", "T"), ("i", "-3"), ("f", "2.5")]);
        assert_eq!(resolver.must_string("s"), "x");
        assert!(resolver.must_bool("b"));
        assert_eq!(resolver.must_int("i"), -3);
        assert_eq!(resolver.must_float("f"), 2.5);
    }

    #[test]
    fn test_fatal_accessors_return_values() {
        let resolver = resolver_with(&[("s", "x"), ("i", "0b11")]);
        assert_eq!(resolver.fatal_string("s"), "x");
        assert_eq!(resolver.fatal_int("i"), 3);
    }

    #[test]
    #[should_panic(expected = "get int \"absent\": key not set: absent")]
    fn test_must_int_panics_on_missing() {
        resolver_with(&[]).must_int("absent");
    }

    #[test]
    #[should_panic(expected = "get bool \"flag\": converting \"flag\" to bool")]
    fn test_must_bool_panics_on_bad_value() {
        resolver_with(&[("flag", "maybe")]).must_bool("flag");
    }
}
