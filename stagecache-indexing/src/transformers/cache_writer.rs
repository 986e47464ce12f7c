//! Stage that persists processed documents into the cache directory.

use async_trait::async_trait;
use stagecache_core::{traits::Transform, CacheLayout, Document, Result as CoreResult};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};
use tokio::{fs, sync::OnceCell};
use tracing::{debug, info};

use crate::cache::SchemaDescriptor;

/// Writes every document that flows through it to the cache directory.
///
/// Documents are stored as JSON under sequentially numbered names
/// (`00000000.xmi`, `00000001.xmi`, ...) so a cache-backed reader yields
/// them in the order they were written. The schema descriptor is written
/// once, before the first document.
///
/// The document itself is passed on unchanged, so the writer can sit at the
/// end of a preprocessing chain without affecting downstream stages.
///
/// # Examples
///
/// ```rust,no_run
/// use stagecache_core::{traits::Transform, CacheLayout, Document};
/// use stagecache_indexing::transformers::CacheWriter;
///
/// # async fn example() -> stagecache_core::Result<()> {
/// let writer = CacheWriter::new("./target/stage-cache", CacheLayout::default());
/// writer.transform(Document::new("processed text")).await?;
/// assert_eq!(writer.written(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CacheWriter {
    /// Target cache directory.
    directory: PathBuf,
    /// File naming rules.
    layout: CacheLayout,
    /// Index of the next document entry.
    next_index: AtomicUsize,
    /// Set once the schema descriptor is on disk.
    schema_written: OnceCell<()>,
}

impl CacheWriter {
    /// Stage name reported by [`Transform::name`].
    pub const NAME: &'static str = "CacheWriter";

    /// Create a writer targeting `directory`.
    pub fn new<P: Into<PathBuf>>(directory: P, layout: CacheLayout) -> Self {
        Self {
            directory: directory.into(),
            layout,
            next_index: AtomicUsize::new(0),
            schema_written: OnceCell::new(),
        }
    }

    /// Target cache directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Number of documents written so far.
    pub fn written(&self) -> usize {
        self.next_index.load(Ordering::SeqCst)
    }

    async fn write_schema(&self, document: &Document) -> CoreResult<()> {
        fs::create_dir_all(&self.directory).await?;
        let path = self.layout.schema_path(&self.directory);
        SchemaDescriptor::describe(document).write(&path).await?;
        info!("Wrote cache schema descriptor to {}", path.display());
        Ok(())
    }
}

#[async_trait]
impl Transform for CacheWriter {
    async fn transform(&self, document: Document) -> CoreResult<Document> {
        self.schema_written
            .get_or_try_init(|| self.write_schema(&document))
            .await?;

        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        let path = self.directory.join(self.layout.document_file_name(index));
        let bytes = serde_json::to_vec(&document)?;
        fs::write(&path, bytes).await?;

        debug!(
            document_id = %document.id,
            path = %path.display(),
            "Cached processed document"
        );
        Ok(document)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config(&self) -> HashMap<String, serde_json::Value> {
        let mut config = HashMap::new();
        config.insert(
            "directory".to_string(),
            serde_json::Value::String(self.directory.display().to_string()),
        );
        config.insert(
            "document_extension".to_string(),
            serde_json::Value::String(self.layout.document_extension.clone()),
        );
        config
    }
}
