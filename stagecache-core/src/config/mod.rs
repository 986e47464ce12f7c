//! Configuration structures for stagecache.
//!
//! The cache is configured through an explicit value object passed to the
//! stage selector; there is no process-wide configuration state.

pub mod cache;

pub use cache::{
    CacheConfig, CacheLayout, DEFAULT_CACHE_DIRECTORY, DEFAULT_DOCUMENT_EXTENSION,
    DEFAULT_SCHEMA_FILE_NAME, ENV_DIRECTORY, ENV_ENABLED,
};
