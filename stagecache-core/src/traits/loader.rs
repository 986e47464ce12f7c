//! Document loading traits.
//!
//! This module defines the reader side of a pipeline: anything that can
//! produce the documents a run starts from, be it an original source reader
//! or a reader over previously cached results.

use async_trait::async_trait;

use crate::{Document, Result};

/// Loads documents from a data source.
///
/// This trait provides a unified interface for the first stage of a pipeline.
/// The cache treats loaders as opaque: an original loader is handed back
/// unmodified when no usable cache exists.
///
/// # Examples
///
/// ```rust,no_run
/// use stagecache_core::traits::Loader;
/// use stagecache_core::{Document, Result};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct StaticLoader {
///     texts: Vec<String>,
/// }
///
/// #[async_trait]
/// impl Loader for StaticLoader {
///     async fn load(&self) -> Result<Vec<Document>> {
///         Ok(self.texts.iter().map(Document::new).collect())
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync + std::fmt::Debug {
    /// Load documents from the data source.
    ///
    /// # Errors
    ///
    /// Returns an error if the data source cannot be accessed or if
    /// document parsing fails.
    async fn load(&self) -> Result<Vec<Document>>;

    /// Get a human-readable name for this loader.
    ///
    /// This is used for logging and debugging purposes.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// In-memory loader over a fixed set of documents.
///
/// Useful as the original reader in tests and demos, and for feeding
/// already-available documents through a cached pipeline.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: Vec<Document>,
}

impl MemoryLoader {
    /// Create a loader that yields clones of `documents` on every load.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents this loader yields.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the loader yields no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl Loader for MemoryLoader {
    async fn load(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn name(&self) -> &'static str {
        "MemoryLoader"
    }
}
