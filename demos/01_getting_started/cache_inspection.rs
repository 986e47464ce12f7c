//! Report what a cache directory holds and whether it would be served.
//!
//! ```bash
//! cargo run --bin cache_inspection -- ./target/demo-stage-cache
//! ```

use stagecache::prelude::*;
use stagecache_indexing::cache::inspect;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = CacheConfig::default().with_env_overrides()?;
    if let Some(directory) = std::env::args().nth(1) {
        config = config.with_directory(PathBuf::from(directory));
    }
    config.validate()?;

    let directory = &config.directory;
    if let Err(e) = ensure_clean(directory, &config.layout) {
        warn!("{e}");
        if let GuardError::Polluted { entries, .. } = &e {
            for entry in entries {
                warn!("  unexpected entry {}", entry.display());
            }
        }
        return Err(e.into());
    }

    let inventory = inspect(directory, &config.layout)?;
    info!(
        "{}: schema present: {}, cached documents: {}, verdict: {:?}",
        directory.display(),
        inventory.schema_present,
        inventory.document_count(),
        inventory.verdict()
    );

    if inventory.verdict().is_usable() {
        let schema = SchemaDescriptor::read(&config.layout.schema_path(directory)).await?;
        info!(
            "Schema {} v{} written {}, annotation kinds {:?}",
            schema.format, schema.version, schema.created_at, schema.annotation_kinds
        );
    }

    Ok(())
}
