//! Memoizing key/value cache
//!
//! `MemoCache` sits in front of the provider chain and stores values that
//! resolved successfully. Failed computations never populate an entry.

mod memo;

pub use memo::MemoCache;
