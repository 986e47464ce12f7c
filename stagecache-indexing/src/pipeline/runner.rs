//! Minimal sequential runner for a reader and a preprocessing stage.
//!
//! This is not a pipeline engine: it loads every document, pushes each one
//! through the preprocessing stage in order and collects the results. It is
//! enough to drive a cached pipeline from tests, demos and small tools.

use stagecache_core::{
    traits::{Loader, Transform},
    Document, Result as CoreResult,
};
use std::time::{Duration, Instant};
use tracing::info;

use super::selector::StagePair;

/// Statistics about one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Number of documents produced by the reader.
    pub documents_loaded: usize,
    /// Number of documents that went through preprocessing.
    pub documents_processed: usize,
    /// Time spent loading.
    pub load_time: Duration,
    /// Time spent in preprocessing.
    pub processing_time: Duration,
}

/// Runs a reader followed by a preprocessing stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePipeline;

impl SimplePipeline {
    /// Run `preprocessing` over every document produced by `reader`.
    ///
    /// # Errors
    ///
    /// The first loader or stage error aborts the run and is returned as-is.
    pub async fn run(
        reader: &dyn Loader,
        preprocessing: &dyn Transform,
    ) -> CoreResult<Vec<Document>> {
        Self::run_with_stats(reader, preprocessing)
            .await
            .map(|(documents, _)| documents)
    }

    /// Run a [`StagePair`] selected by the stage cache.
    pub async fn run_stages(stages: &StagePair) -> CoreResult<(Vec<Document>, RunStats)> {
        Self::run_with_stats(&stages.reader, &stages.preprocessing).await
    }

    /// Run and report statistics.
    pub async fn run_with_stats(
        reader: &dyn Loader,
        preprocessing: &dyn Transform,
    ) -> CoreResult<(Vec<Document>, RunStats)> {
        let started = Instant::now();
        let documents = reader.load().await?;
        let load_time = started.elapsed();
        let documents_loaded = documents.len();

        let started = Instant::now();
        let mut processed = Vec::with_capacity(documents_loaded);
        for document in documents {
            processed.push(preprocessing.transform(document).await?);
        }
        let processing_time = started.elapsed();

        info!(
            reader = reader.name(),
            documents = processed.len(),
            ?load_time,
            ?processing_time,
            "Pipeline run complete"
        );

        let stats = RunStats {
            documents_loaded,
            documents_processed: processed.len(),
            load_time,
            processing_time,
        };
        Ok((processed, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StageChain;
    use crate::transformers::Passthrough;
    use stagecache_core::traits::MemoryLoader;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_runs_every_document() {
        let loader = MemoryLoader::new(vec![Document::new("a"), Document::new("b")]);
        let chain = StageChain::new().then(Arc::new(Passthrough));

        let (docs, stats) = SimplePipeline::run_with_stats(&loader, &chain).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(stats.documents_loaded, 2);
        assert_eq!(stats.documents_processed, 2);
    }

    #[tokio::test]
    async fn test_empty_reader() {
        let docs = SimplePipeline::run(&MemoryLoader::default(), &Passthrough)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
