//! Cache directory handling and stage selection for stagecache.
//!
//! This crate turns an expensive "read + preprocess" pipeline into one that
//! persists its results and serves them on later runs:
//!
//! - **Cache**: directory guard, cache state detection, schema descriptor
//! - **Loaders**: reader over cached documents
//! - **Transformers**: cache writer and no-op passthrough stages
//! - **Pipeline**: stage selection, stage chains and a simple runner
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stagecache_indexing::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reader = Arc::new(MemoryLoader::new(vec![Document::new("Some text")]));
//!     let preprocessing = Arc::new(Passthrough);
//!
//!     let mut cache = StageCache::new(CacheConfig::default(), reader, preprocessing);
//!     let stages = cache.stages()?;
//!
//!     let (documents, stats) = SimplePipeline::run_stages(&stages).await?;
//!     println!(
//!         "{} documents in {:?}, served from cache: {}",
//!         documents.len(),
//!         stats.processing_time,
//!         stages.state.serves_from_cache()
//!     );
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod error;
pub mod loaders;
pub mod pipeline;
pub mod transformers;

pub use crate::pipeline::{StageCache, StageChain, StagePair};

/// Re-export commonly used types and traits.
pub mod prelude {
    // Re-export our own error types
    pub use crate::error::{CacheError, GuardError, Result as CacheResult};

    // Re-export cache directory handling
    pub use crate::cache::{detect, ensure_clean, CacheVerdict, SchemaDescriptor};

    // Re-export stages
    pub use crate::loaders::CachedDocumentLoader;
    pub use crate::transformers::{CacheWriter, Passthrough};

    // Re-export pipeline
    pub use crate::pipeline::{
        CacheStageFactory, CacheState, JsonCacheFormat, ReaderStage, RunStats, SimplePipeline,
        StageCache, StageChain, StagePair,
    };

    // Re-export core types (avoid conflicts)
    pub use stagecache_core::{
        traits::{Loader, MemoryLoader, Transform},
        Annotation, CacheConfig, CacheLayout, Document, Result as CoreResult, StagecacheError,
    };
}
