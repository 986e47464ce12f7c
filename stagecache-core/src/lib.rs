//! # Stagecache Core
//!
//! Core traits, types, and configuration for the stagecache pipeline cache.
//!
//! This crate provides the building blocks shared by every stage of a cached
//! document pipeline:
//!
//! - **Data structures**: [`Document`] and its [`Annotation`]s
//! - **Core traits**: [`Loader`] (document sources) and [`Transform`]
//!   (preprocessing stages)
//! - **Configuration**: [`CacheConfig`] and the on-disk [`CacheLayout`]
//! - **Error handling**: [`StagecacheError`] with constructor helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use stagecache_core::prelude::*;
//!
//! let doc = Document::builder()
//!     .content("This is a sample document")
//!     .metadata("source", "example.txt")
//!     .build();
//!
//! let config = CacheConfig::new("./target/my-cache").with_enabled(true);
//! assert!(config.validate().is_ok());
//! assert_eq!(doc.content, "This is a sample document");
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used types and traits
pub mod prelude;

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key types at crate root for convenience
pub use config::{CacheConfig, CacheLayout};
pub use error::{Result, StagecacheError};
pub use types::{Annotation, Document, DocumentBuilder};

// Re-export traits for convenience
pub use traits::*;

/// Version information for the stagecache core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the stagecache core library.
pub const NAME: &str = env!("CARGO_PKG_NAME");
