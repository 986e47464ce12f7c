//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! from the stagecache core library for easy importing.
//!
//! # Examples
//!
//! ```rust
//! use stagecache_core::prelude::*;
//!
//! let doc = Document::new("Hello, world!");
//! let config = CacheConfig::default();
//! assert!(config.enabled);
//! ```

// Re-export core error types
pub use crate::error::{Result, StagecacheError};

// Re-export data types
pub use crate::types::{Annotation, Document, DocumentBuilder};

// Re-export core traits
pub use crate::traits::{Loader, MemoryLoader, Transform};

// Re-export configuration types
pub use crate::config::{CacheConfig, CacheLayout};
