//! Construction of the cache-reading and cache-writing stages.

use stagecache_core::{traits::Loader, traits::Transform, CacheLayout, Result as CoreResult};
use std::path::Path;
use std::sync::Arc;

use crate::loaders::CachedDocumentLoader;
use crate::transformers::CacheWriter;

/// Builds the serialization stages the stage selector wires into a pipeline.
///
/// The selector never reads or writes documents itself; it only asks the
/// factory for a reader over the cache directory or a writer into it.
/// Construction errors are handed back to the caller unchanged.
pub trait CacheStageFactory: Send + Sync + std::fmt::Debug {
    /// Build a loader that scans `directory` for serialized documents.
    fn reader(&self, directory: &Path, layout: &CacheLayout) -> CoreResult<Arc<dyn Loader>>;

    /// Build a stage that persists each document into `directory`.
    fn writer(&self, directory: &Path, layout: &CacheLayout) -> CoreResult<Arc<dyn Transform>>;
}

/// Default factory: JSON-encoded documents plus a JSON schema descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCacheFormat;

impl CacheStageFactory for JsonCacheFormat {
    fn reader(&self, directory: &Path, layout: &CacheLayout) -> CoreResult<Arc<dyn Loader>> {
        Ok(Arc::new(CachedDocumentLoader::new(directory, layout.clone())))
    }

    fn writer(&self, directory: &Path, layout: &CacheLayout) -> CoreResult<Arc<dyn Transform>> {
        Ok(Arc::new(CacheWriter::new(directory, layout.clone())))
    }
}
