//! Ordered-provider resolution
//!
//! `Resolver` walks a fixed list of providers, returns the first value found
//! and memoizes successful lookups. Typed accessors (`get_bool`, `must_int`,
//! `fatal_string`, ...) are layered on top of `Resolver::resolve`.

mod error;
mod chain_resolver;
mod typed;

pub use error::{ResolveError, ResolveResult, AccessError, AccessResult};
pub use chain_resolver::{Resolver, ResolverBuilder, Resolved};
