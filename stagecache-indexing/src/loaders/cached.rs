//! Loader over previously cached documents.

use async_trait::async_trait;
use futures::future::try_join_all;
use stagecache_core::{traits::Loader, CacheLayout, Document, Result as CoreResult, StagecacheError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::cache::SchemaDescriptor;

/// Loads the serialized documents of a cache directory.
///
/// Only the top level of the directory is scanned, and only entries with the
/// layout's document extension are read. Documents are returned in file name
/// order, which is the order the [`crate::transformers::CacheWriter`] wrote them.
///
/// # Examples
///
/// ```rust,no_run
/// use stagecache_core::{traits::Loader, CacheLayout};
/// use stagecache_indexing::loaders::CachedDocumentLoader;
///
/// # async fn example() -> stagecache_core::Result<()> {
/// let loader = CachedDocumentLoader::new("./target/stage-cache", CacheLayout::default());
/// let documents = loader.load().await?;
/// println!("Loaded {} cached documents", documents.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CachedDocumentLoader {
    /// Cache directory to scan.
    directory: PathBuf,
    /// File naming rules.
    layout: CacheLayout,
}

impl CachedDocumentLoader {
    /// Loader name reported by [`Loader::name`].
    pub const NAME: &'static str = "CachedDocumentLoader";

    /// Create a loader scanning `directory`.
    pub fn new<P: Into<PathBuf>>(directory: P, layout: CacheLayout) -> Self {
        Self {
            directory: directory.into(),
            layout,
        }
    }

    /// Cache directory being scanned.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// List the serialized-document entries, sorted by name.
    pub async fn document_files(&self) -> CoreResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(&self.directory).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let is_document = entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.layout.is_document_file(name));
            if is_document {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }

    async fn check_schema(&self) -> CoreResult<()> {
        let schema_path = self.layout.schema_path(&self.directory);
        let schema = SchemaDescriptor::read(&schema_path).await?;
        if !schema.is_compatible() {
            warn!(
                format = %schema.format,
                version = schema.version,
                "Cache schema at {} was written by a different encoder",
                schema_path.display()
            );
        }
        Ok(())
    }

    async fn read_document(path: PathBuf) -> CoreResult<Document> {
        let bytes = fs::read(&path).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            StagecacheError::loader(format!(
                "Failed to decode cached document {}: {e}",
                path.display()
            ))
        })
    }
}

#[async_trait]
impl Loader for CachedDocumentLoader {
    async fn load(&self) -> CoreResult<Vec<Document>> {
        self.check_schema().await?;

        let files = self.document_files().await?;
        debug!(
            "Reading {} cached documents from {}",
            files.len(),
            self.directory.display()
        );

        let documents = try_join_all(files.into_iter().map(Self::read_document)).await?;

        info!(
            "Loaded {} documents from cache {}",
            documents.len(),
            self.directory.display()
        );
        Ok(documents)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
