//! Run an expensive preprocessing pipeline twice through the stage cache.
//!
//! The first run tokenizes and tags every document and writes the results to
//! the cache directory. The second run reads them back and skips both stages.
//!
//! ```bash
//! RUST_LOG=info cargo run --bin cached_pipeline
//! STAGECACHE_ENABLED=false cargo run --bin cached_pipeline
//! ```

use async_trait::async_trait;
use stagecache::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Splits on whitespace and records a `Token` annotation per word.
#[derive(Debug)]
struct WhitespaceTokenizer {
    /// Simulated cost per document.
    delay: Duration,
}

#[async_trait]
impl Transform for WhitespaceTokenizer {
    async fn transform(&self, document: Document) -> CoreResult<Document> {
        tokio::time::sleep(self.delay).await;

        let mut tokens = Vec::new();
        let mut start = None;
        for (index, ch) in document.content.char_indices() {
            match (ch.is_whitespace(), start) {
                (false, None) => start = Some(index),
                (true, Some(begin)) => {
                    tokens.push(Annotation::new("Token", begin, index));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(begin) = start {
            tokens.push(Annotation::new("Token", begin, document.content.len()));
        }

        Ok(tokens
            .into_iter()
            .fold(document, Document::with_annotation))
    }

    fn name(&self) -> &'static str {
        "WhitespaceTokenizer"
    }
}

/// Marks tokens found in a fixed list of names.
#[derive(Debug)]
struct GazetteerTagger {
    entries: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl Transform for GazetteerTagger {
    async fn transform(&self, document: Document) -> CoreResult<Document> {
        let mut found = Vec::new();
        for token in document.annotations_of("Token") {
            let text = &document.content[token.start..token.end];
            if let Some((_, label)) = self.entries.iter().find(|(name, _)| *name == text) {
                found.push(
                    Annotation::new("NamedEntity", token.start, token.end)
                        .with_attribute("label", *label),
                );
            }
        }
        Ok(found.into_iter().fold(document, Document::with_annotation))
    }

    fn name(&self) -> &'static str {
        "GazetteerTagger"
    }
}

fn corpus() -> Vec<Document> {
    [
        "Obama visited Berlin on Tuesday",
        "Merkel welcomed him at the Chancellery",
        "Reporters from Paris and London attended",
        "The visit ended in Hamburg",
    ]
    .into_iter()
    .map(|text| Document::new(text).with_metadata("source", "demo"))
    .collect()
}

fn preprocessing() -> StageChain {
    StageChain::new()
        .then(Arc::new(WhitespaceTokenizer {
            delay: Duration::from_millis(150),
        }))
        .then(Arc::new(GazetteerTagger {
            entries: vec![
                ("Obama", "PER"),
                ("Merkel", "PER"),
                ("Berlin", "LOC"),
                ("Paris", "LOC"),
                ("London", "LOC"),
                ("Hamburg", "LOC"),
            ],
        }))
}

async fn run_once(config: &CacheConfig, label: &str) -> anyhow::Result<()> {
    let mut cache = StageCache::new(
        config.clone(),
        Arc::new(MemoryLoader::new(corpus())),
        Arc::new(preprocessing()),
    );
    let stages = cache.stages()?;
    info!(
        "{label}: state {:?}, stages {:?}",
        stages.state,
        stages.preprocessing.names()
    );

    let (documents, stats) = SimplePipeline::run_stages(&stages).await?;
    let entities: usize = documents
        .iter()
        .map(|doc| doc.annotations_of("NamedEntity").count())
        .sum();
    info!(
        "{label}: {} documents, {entities} entities, preprocessing took {:?}",
        stats.documents_processed, stats.processing_time
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CacheConfig::new("./target/demo-stage-cache").with_env_overrides()?;
    info!(
        "Using cache directory {} (enabled: {})",
        config.directory.display(),
        config.enabled
    );

    run_once(&config, "first run").await?;
    run_once(&config, "second run").await?;

    Ok(())
}
