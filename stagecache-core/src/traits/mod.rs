//! Core traits for stagecache.
//!
//! This module defines the two stage interfaces a cached pipeline is built
//! from: loaders that produce documents and transforms that process them.

pub mod loader;
pub mod transformer;

// Re-export all traits for convenience
pub use loader::*;
pub use transformer::*;
