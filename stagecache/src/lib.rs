//! # Stagecache - cached preprocessing for document pipelines
//!
//! Stagecache wraps the "read + preprocess" front of a document pipeline.
//! The first run reads and preprocesses as usual and writes every processed
//! document to a cache directory. Later runs read the processed documents
//! back and skip preprocessing entirely.
//!
//! ## Quick Start
//!
//! ```rust
//! use stagecache::prelude::*;
//!
//! let config = CacheConfig::new("./target/ner-cache").with_enabled(true);
//! let doc = Document::new("Barack Obama visited Berlin")
//!     .with_annotation(Annotation::new("Token", 0, 6));
//!
//! println!("Cache directory: {}", config.directory.display());
//! println!("Document: {}", doc.content);
//! ```
//!
//! ## Architecture
//!
//! - **stagecache-core**: documents, reader and stage traits, configuration
//! - **stagecache-indexing**: directory guard, cache detection, stage selection

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export all public APIs from sub-crates
pub use stagecache_core as core;
pub use stagecache_indexing as indexing;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and traits
/// from all Stagecache modules.
pub mod prelude {
    pub use stagecache_core::prelude::*;
    pub use stagecache_indexing::prelude::*;
}

/// Version information for the Stagecache framework.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
