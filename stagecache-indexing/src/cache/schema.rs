//! Schema descriptor written next to the cached documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagecache_core::{Document, Result as CoreResult, StagecacheError};
use std::collections::BTreeSet;
use std::path::Path;
use tokio::fs;

/// Format identifier of documents written by [`crate::transformers::CacheWriter`].
pub const JSON_FORMAT: &str = "stagecache-json";

/// Version of the document encoding.
pub const FORMAT_VERSION: u32 = 1;

/// Describes the structure of the serialized documents in a cache directory.
///
/// The descriptor is captured from the first document written during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaDescriptor {
    /// Encoding of the document entries.
    pub format: String,
    /// Version of the encoding.
    pub version: u32,
    /// Annotation kinds present on the first cached document.
    pub annotation_kinds: Vec<String>,
    /// Metadata keys present on the first cached document.
    pub metadata_keys: Vec<String>,
    /// When the descriptor was written.
    pub created_at: DateTime<Utc>,
}

impl SchemaDescriptor {
    /// Describe the structure of `document`.
    pub fn describe(document: &Document) -> Self {
        let annotation_kinds: BTreeSet<_> =
            document.annotations.iter().map(|a| a.kind.clone()).collect();
        let metadata_keys: BTreeSet<_> = document.metadata.keys().cloned().collect();

        Self {
            format: JSON_FORMAT.to_string(),
            version: FORMAT_VERSION,
            annotation_kinds: annotation_kinds.into_iter().collect(),
            metadata_keys: metadata_keys.into_iter().collect(),
            created_at: Utc::now(),
        }
    }

    /// Check whether documents described by this schema can be decoded.
    pub fn is_compatible(&self) -> bool {
        self.format == JSON_FORMAT && self.version == FORMAT_VERSION
    }

    /// Write the descriptor to `path`.
    pub async fn write(&self, path: &Path) -> CoreResult<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(path, bytes).await?;
        Ok(())
    }

    /// Read a descriptor from `path`.
    pub async fn read(path: &Path) -> CoreResult<Self> {
        let bytes = fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StagecacheError::not_found(path.display().to_string())
            } else {
                StagecacheError::Io(e)
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecache_core::Annotation;

    #[test]
    fn test_describe_collects_sorted_keys() {
        let doc = Document::new("Berlin is big")
            .with_metadata("source", "a.txt")
            .with_metadata("lang", "en")
            .with_annotation(Annotation::new("Token", 0, 6))
            .with_annotation(Annotation::new("NamedEntity", 0, 6))
            .with_annotation(Annotation::new("Token", 7, 9));

        let schema = SchemaDescriptor::describe(&doc);
        assert_eq!(schema.annotation_kinds, vec!["NamedEntity", "Token"]);
        assert_eq!(schema.metadata_keys, vec!["lang", "source"]);
        assert!(schema.is_compatible());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("typesystem.xml");

        let schema = SchemaDescriptor::describe(&Document::new("x"));
        schema.write(&path).await.unwrap();

        let loaded = SchemaDescriptor::read(&path).await.unwrap();
        assert_eq!(loaded, schema);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let err = SchemaDescriptor::read(&temp.path().join("typesystem.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, StagecacheError::NotFound { .. }));
    }
}
