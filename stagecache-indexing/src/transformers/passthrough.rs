//! No-op preprocessing stage.

use async_trait::async_trait;
use stagecache_core::{traits::Transform, Document, Result as CoreResult};

/// A stage that hands every document back unchanged.
///
/// Occupies the preprocessing slot when cached documents already carry the
/// results preprocessing would have produced. It never fails and has no side
/// effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Passthrough {
    /// Stage name reported by [`Transform::name`].
    pub const NAME: &'static str = "Passthrough";

    /// Create a passthrough stage.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transform for Passthrough {
    async fn transform(&self, document: Document) -> CoreResult<Document> {
        Ok(document)
    }

    async fn transform_batch(&self, documents: Vec<Document>) -> CoreResult<Vec<Document>> {
        Ok(documents)
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecache_core::Annotation;

    #[tokio::test]
    async fn test_document_is_unchanged() {
        let doc = Document::new("cached text")
            .with_metadata("source", "a.txt")
            .with_annotation(Annotation::new("Token", 0, 6));

        let out = Passthrough::new().transform(doc.clone()).await.unwrap();
        assert_eq!(out, doc);
    }

    #[tokio::test]
    async fn test_batch_is_unchanged() {
        let docs = vec![Document::new("a"), Document::new("b")];
        let out = Passthrough.transform_batch(docs.clone()).await.unwrap();
        assert_eq!(out, docs);
        assert_eq!(Passthrough.name(), "Passthrough");
    }
}
