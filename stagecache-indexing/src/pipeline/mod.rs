//! Cache-aware pipeline composition.
//!
//! This module decides which stages a pipeline runs and composes them:
//!
//! - **StageCache**: picks the reader and preprocessing for one setup
//! - **StageChain**: ordered list of preprocessing stages
//! - **CacheStageFactory**: builds cache readers and writers
//! - **SimplePipeline**: sequential runner for tests and small tools

pub mod chain;
pub mod factory;
pub mod runner;
pub mod selector;

// Re-export the main pipeline types for convenience
pub use chain::StageChain;
pub use factory::{CacheStageFactory, JsonCacheFormat};
pub use runner::{RunStats, SimplePipeline};
pub use selector::{CacheState, ReaderStage, StageCache, StagePair};
