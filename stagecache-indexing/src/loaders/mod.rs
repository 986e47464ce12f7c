//! Document loaders backed by the cache.
//!
//! This module provides the reader that replaces the original source reader
//! once a usable cache exists.

pub mod cached;

pub use cached::CachedDocumentLoader;
