//! Preprocessing stages provided by the cache.
//!
//! This module provides the two stages the stage selector wires into a
//! pipeline in place of, or after, the caller's own preprocessing.

pub mod cache_writer;
pub mod passthrough;

pub use cache_writer::CacheWriter;
pub use passthrough::Passthrough;
