//! Core data types for stagecache.
//!
//! This module contains the document model shared by loaders, preprocessing
//! stages and the cache.

pub mod document;

// Re-export all types for convenience
pub use document::*;
