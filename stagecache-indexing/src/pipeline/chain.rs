//! Ordered composition of preprocessing stages.

use async_trait::async_trait;
use stagecache_core::{traits::Transform, Document, Result as CoreResult};
use std::sync::Arc;
use tracing::debug;

/// An ordered list of preprocessing stages that behaves as a single stage.
///
/// Each document is passed through the stages in order; the output of one
/// stage is the input of the next. The list stays inspectable so callers (and
/// tests) can see exactly what a pipeline will run.
///
/// # Examples
///
/// ```rust
/// use stagecache_indexing::pipeline::StageChain;
/// use stagecache_indexing::transformers::Passthrough;
/// use std::sync::Arc;
///
/// let chain = StageChain::new().then(Arc::new(Passthrough));
/// assert_eq!(chain.names(), vec!["Passthrough"]);
/// assert!(chain.is_passthrough());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StageChain {
    stages: Vec<Arc<dyn Transform>>,
}

impl StageChain {
    /// Create an empty chain. An empty chain returns documents unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage.
    #[must_use]
    pub fn then(mut self, stage: Arc<dyn Transform>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append a stage in place.
    pub fn push(&mut self, stage: Arc<dyn Transform>) {
        self.stages.push(stage);
    }

    /// The stages, in execution order.
    pub fn stages(&self) -> &[Arc<dyn Transform>] {
        &self.stages
    }

    /// Names of the stages, in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check if the chain only holds the no-op passthrough stage.
    pub fn is_passthrough(&self) -> bool {
        self.names() == [crate::transformers::Passthrough::NAME]
    }

    /// Check if the chain ends with a cache-writing stage.
    pub fn writes_cache(&self) -> bool {
        self.stages
            .last()
            .is_some_and(|stage| stage.name() == crate::transformers::CacheWriter::NAME)
    }
}

#[async_trait]
impl Transform for StageChain {
    async fn transform(&self, document: Document) -> CoreResult<Document> {
        let mut document = document;
        for (index, stage) in self.stages.iter().enumerate() {
            let id = document.id;
            document = stage.transform(document).await.inspect_err(|e| {
                debug!(
                    document_id = %id,
                    stage = stage.name(),
                    index,
                    "Stage failed: {e}"
                );
            })?;
        }
        Ok(document)
    }

    fn name(&self) -> &'static str {
        "StageChain"
    }
}
