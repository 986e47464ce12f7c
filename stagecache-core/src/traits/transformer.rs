//! Preprocessing stage interface.
//!
//! A preprocessing stage consumes one document and produces one annotated
//! document. Stages are composed into ordered chains; the cache appends its
//! writer to such a chain or replaces the whole chain with a passthrough.

use async_trait::async_trait;

use crate::{Document, Result};

/// A unit of document processing.
///
/// # Examples
///
/// ```rust,no_run
/// use stagecache_core::traits::Transform;
/// use stagecache_core::{Annotation, Document, Result};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct WhitespaceTokenizer;
///
/// #[async_trait]
/// impl Transform for WhitespaceTokenizer {
///     async fn transform(&self, mut document: Document) -> Result<Document> {
///         let mut offset = 0;
///         for word in document.content.clone().split(' ') {
///             document.annotations.push(Annotation::new("Token", offset, offset + word.len()));
///             offset += word.len() + 1;
///         }
///         Ok(document)
///     }
/// }
/// ```
#[async_trait]
pub trait Transform: Send + Sync + std::fmt::Debug {
    /// Process one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be processed. Errors abort
    /// the run for that document; stages never skip documents silently.
    async fn transform(&self, document: Document) -> Result<Document>;

    /// Process multiple documents in order.
    ///
    /// The default implementation processes documents one by one, but
    /// implementations can override this for batch optimization.
    async fn transform_batch(&self, documents: Vec<Document>) -> Result<Vec<Document>> {
        let mut processed = Vec::with_capacity(documents.len());
        for document in documents {
            processed.push(self.transform(document).await?);
        }
        Ok(processed)
    }

    /// Get a human-readable name for this stage.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Get configuration information about this stage.
    fn config(&self) -> std::collections::HashMap<String, serde_json::Value> {
        // Default implementation returns empty config
        std::collections::HashMap::new()
    }
}
