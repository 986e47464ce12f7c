//! Stage selection: read and preprocess, or read from the cache.
//!
//! [`StageCache`] sits between a caller's pipeline definition and the
//! pipeline runner. Given the original reader and preprocessing stage, it
//! hands back either
//!
//! - a cache-backed reader and a [`Passthrough`] preprocessing stage, when the
//!   cache directory holds a usable cache and caching is enabled, or
//! - the original reader and the original preprocessing followed by a cache
//!   writer, otherwise.
//!
//! The decision is taken once and stored, so the reader and preprocessing
//! accessors always agree even if the directory changes in between.

use async_trait::async_trait;
use stagecache_core::{
    traits::{Loader, Transform},
    CacheConfig, Document, Result as CoreResult,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::chain::StageChain;
use super::factory::{CacheStageFactory, JsonCacheFormat};
use crate::cache::{ensure_clean, inspect, CacheVerdict};
use crate::error::{CacheError, GuardError, Result};
use crate::transformers::Passthrough;

/// State of the cache for one pipeline setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// Caching is turned off by configuration.
    Disabled,
    /// Caching is on but the directory holds no usable cache.
    Unusable,
    /// Caching is on and cached documents can be served.
    Usable,
}

impl CacheState {
    /// Check whether the pipeline reads from the cache.
    pub fn serves_from_cache(self) -> bool {
        matches!(self, Self::Usable)
    }
}

/// The reader a pipeline should start from.
#[derive(Debug, Clone)]
pub enum ReaderStage {
    /// The caller-supplied reader, unmodified.
    Original(Arc<dyn Loader>),
    /// A reader over the serialized documents of the cache directory.
    Cached {
        /// Cache directory being read.
        directory: PathBuf,
        /// The cache-reading loader.
        loader: Arc<dyn Loader>,
    },
}

impl ReaderStage {
    /// The loader to run.
    pub fn loader(&self) -> &Arc<dyn Loader> {
        match self {
            Self::Original(loader) | Self::Cached { loader, .. } => loader,
        }
    }

    /// Check whether this reader serves cached documents.
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }

    /// Cache directory, for a cache-backed reader.
    pub fn cache_directory(&self) -> Option<&Path> {
        match self {
            Self::Cached { directory, .. } => Some(directory),
            Self::Original(_) => None,
        }
    }
}

#[async_trait]
impl Loader for ReaderStage {
    async fn load(&self) -> CoreResult<Vec<Document>> {
        self.loader().load().await
    }

    fn name(&self) -> &'static str {
        self.loader().name()
    }
}

/// Reader and preprocessing derived from the same cache state.
#[derive(Debug, Clone)]
pub struct StagePair {
    /// The state both stages were selected for.
    pub state: CacheState,
    /// Reader to start the pipeline with.
    pub reader: ReaderStage,
    /// Preprocessing to run on every document.
    pub preprocessing: StageChain,
}

/// Selects cache-aware pipeline stages.
///
/// # Examples
///
/// ```rust,no_run
/// use stagecache_core::{traits::MemoryLoader, CacheConfig, Document};
/// use stagecache_indexing::pipeline::{SimplePipeline, StageCache};
/// use stagecache_indexing::transformers::Passthrough;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let reader = Arc::new(MemoryLoader::new(vec![Document::new("text")]));
/// let preprocessing = Arc::new(Passthrough);
///
/// let mut cache = StageCache::new(CacheConfig::new("./target/ner-cache"), reader, preprocessing);
/// let reader = cache.caching_reader()?;
/// let preprocessing = cache.caching_preprocessing()?;
///
/// let documents = SimplePipeline::run(&reader, &preprocessing).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StageCache {
    /// Cache configuration.
    config: CacheConfig,
    /// Caller-supplied reader.
    original_reader: Arc<dyn Loader>,
    /// Caller-supplied preprocessing.
    original_preprocessing: Arc<dyn Transform>,
    /// Builds cache readers and writers.
    factory: Arc<dyn CacheStageFactory>,
    /// State computed for the current setup.
    snapshot: Option<CacheState>,
}

impl StageCache {
    /// Create a stage cache using the default JSON serialization stages.
    pub fn new(
        config: CacheConfig,
        reader: Arc<dyn Loader>,
        preprocessing: Arc<dyn Transform>,
    ) -> Self {
        Self::with_factory(config, reader, preprocessing, Arc::new(JsonCacheFormat))
    }

    /// Create a stage cache with custom serialization stages.
    pub fn with_factory(
        config: CacheConfig,
        reader: Arc<dyn Loader>,
        preprocessing: Arc<dyn Transform>,
        factory: Arc<dyn CacheStageFactory>,
    ) -> Self {
        Self {
            config,
            original_reader: reader,
            original_preprocessing: preprocessing,
            factory,
            snapshot: None,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Turn caching on or off. Drops the stored cache state.
    pub fn set_use_cache(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.refresh();
    }

    /// Replace the configuration. Drops the stored cache state.
    pub fn set_config(&mut self, config: CacheConfig) {
        self.config = config;
        self.refresh();
    }

    /// Replace the original reader. Drops the stored cache state.
    pub fn set_original_reader(&mut self, reader: Arc<dyn Loader>) {
        self.original_reader = reader;
        self.refresh();
    }

    /// Replace the original preprocessing. Drops the stored cache state.
    pub fn set_original_preprocessing(&mut self, preprocessing: Arc<dyn Transform>) {
        self.original_preprocessing = preprocessing;
        self.refresh();
    }

    /// Forget the stored cache state; the next accessor re-inspects the directory.
    pub fn refresh(&mut self) {
        self.snapshot = None;
    }

    /// Cache state for the current setup, computing it on first use.
    pub fn state(&mut self) -> Result<CacheState> {
        if let Some(state) = self.snapshot {
            return Ok(state);
        }

        let state = self.evaluate()?;
        self.snapshot = Some(state);
        Ok(state)
    }

    /// The reader to use.
    pub fn caching_reader(&mut self) -> Result<ReaderStage> {
        let state = self.state()?;
        self.reader_for(state)
    }

    /// The preprocessing to use.
    pub fn caching_preprocessing(&mut self) -> Result<StageChain> {
        let state = self.state()?;
        self.preprocessing_for(state)
    }

    /// Reader and preprocessing together.
    pub fn stages(&mut self) -> Result<StagePair> {
        let state = self.state()?;
        Ok(StagePair {
            state,
            reader: self.reader_for(state)?,
            preprocessing: self.preprocessing_for(state)?,
        })
    }

    fn evaluate(&self) -> Result<CacheState> {
        self.config.validate()?;

        let directory = &self.config.directory;
        let layout = &self.config.layout;

        ensure_clean(directory, layout)
            .map_err(|source| CacheError::resource_initialization(directory, source))?;

        if !self.config.enabled {
            info!(
                "Caching disabled by configuration. Using original reader {}",
                self.original_reader.name()
            );
            return Ok(CacheState::Disabled);
        }

        let inventory = inspect(directory, layout).map_err(|e| {
            CacheError::resource_initialization(directory, GuardError::Io(e))
        })?;

        match inventory.verdict() {
            CacheVerdict::Usable => {
                info!(
                    documents = inventory.document_count(),
                    "Serving cached documents from {}",
                    directory.display()
                );
                Ok(CacheState::Usable)
            }
            CacheVerdict::Unusable => {
                info!(
                    schema_present = inventory.schema_present,
                    documents = inventory.document_count(),
                    "Could not find cached documents in {}. Using original reader {}",
                    directory.display(),
                    self.original_reader.name()
                );
                Ok(CacheState::Unusable)
            }
        }
    }

    fn reader_for(&self, state: CacheState) -> Result<ReaderStage> {
        if state.serves_from_cache() {
            let directory = self.config.directory.clone();
            let loader = self.factory.reader(&directory, &self.config.layout)?;
            debug!("Selected cache reader {}", loader.name());
            Ok(ReaderStage::Cached { directory, loader })
        } else {
            Ok(ReaderStage::Original(Arc::clone(&self.original_reader)))
        }
    }

    fn preprocessing_for(&self, state: CacheState) -> Result<StageChain> {
        if state.serves_from_cache() {
            return Ok(StageChain::new().then(Arc::new(Passthrough)));
        }

        let writer = self
            .factory
            .writer(&self.config.directory, &self.config.layout)?;
        Ok(StageChain::new()
            .then(Arc::clone(&self.original_preprocessing))
            .then(writer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecache_core::{traits::MemoryLoader, CacheLayout, StagecacheError};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct LogBuffer {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.buf.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `f` and return what it logged at info level.
    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    fn populate(dir: &Path, documents: usize) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("typesystem.xml"), b"{}").unwrap();
        for i in 0..documents {
            fs::write(dir.join(format!("{i:08}.xmi")), b"{}").unwrap();
        }
    }

    fn stage_cache(dir: &Path) -> StageCache {
        StageCache::new(
            CacheConfig::new(dir),
            Arc::new(MemoryLoader::new(vec![Document::new("source")])),
            Arc::new(Passthrough),
        )
    }

    #[test]
    fn test_snapshot_keeps_accessors_consistent() {
        let temp = TempDir::new().unwrap();
        let mut cache = stage_cache(temp.path());

        let reader = cache.caching_reader().unwrap();
        assert!(!reader.is_cached());

        // Another process fills the cache between the two accessor calls.
        populate(temp.path(), 2);

        let preprocessing = cache.caching_preprocessing().unwrap();
        assert!(preprocessing.writes_cache());
        assert_eq!(cache.state().unwrap(), CacheState::Unusable);
    }

    #[test]
    fn test_refresh_observes_new_contents() {
        let temp = TempDir::new().unwrap();
        let mut cache = stage_cache(temp.path());
        assert_eq!(cache.state().unwrap(), CacheState::Unusable);

        populate(temp.path(), 1);
        assert_eq!(cache.state().unwrap(), CacheState::Unusable);

        cache.refresh();
        assert_eq!(cache.state().unwrap(), CacheState::Usable);
    }

    #[test]
    fn test_toggle_invalidates_snapshot() {
        let temp = TempDir::new().unwrap();
        populate(temp.path(), 3);
        let mut cache = stage_cache(temp.path());

        assert_eq!(cache.state().unwrap(), CacheState::Usable);
        cache.set_use_cache(false);
        assert_eq!(cache.state().unwrap(), CacheState::Disabled);
        assert!(!cache.config().enabled);
    }

    #[test]
    fn test_disabled_and_missing_cache_log_differently() {
        let temp = TempDir::new().unwrap();

        let missing = capture_logs(|| {
            let mut cache = stage_cache(temp.path());
            assert_eq!(cache.state().unwrap(), CacheState::Unusable);
        });
        let disabled = capture_logs(|| {
            let mut cache = stage_cache(temp.path());
            cache.set_use_cache(false);
            assert_eq!(cache.state().unwrap(), CacheState::Disabled);
        });

        assert!(missing.contains("INFO"));
        assert!(missing.contains("Could not find cached documents in"));
        assert!(missing.contains("Using original reader MemoryLoader"));
        assert!(!missing.contains("Caching disabled by configuration"));

        assert!(disabled.contains("Caching disabled by configuration"));
        assert!(disabled.contains("Using original reader MemoryLoader"));
        assert!(!disabled.contains("Could not find cached documents"));
    }

    #[test]
    fn test_pollution_fails_even_when_disabled() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), b"not a cache").unwrap();
        let mut cache = stage_cache(temp.path());
        cache.set_use_cache(false);

        let err = cache.caching_reader().unwrap_err();
        assert_eq!(err.polluting_file_count(), Some(1));
    }

    #[test]
    fn test_failed_setup_is_not_remembered() {
        let temp = TempDir::new().unwrap();
        let stray = temp.path().join("stray.log");
        fs::write(&stray, b"").unwrap();
        let mut cache = stage_cache(temp.path());

        assert!(cache.state().is_err());
        fs::remove_file(&stray).unwrap();
        assert_eq!(cache.state().unwrap(), CacheState::Unusable);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut cache = stage_cache(temp.path());
        cache.set_config(CacheConfig::new(temp.path()).with_layout(CacheLayout {
            document_extension: "json".to_string(),
            ..CacheLayout::default()
        }));

        let err = cache.stages().unwrap_err();
        assert!(matches!(
            err,
            CacheError::Core(StagecacheError::Configuration { .. })
        ));
    }

    #[derive(Debug)]
    struct BrokenFactory;

    impl CacheStageFactory for BrokenFactory {
        fn reader(&self, _: &Path, _: &CacheLayout) -> CoreResult<Arc<dyn Loader>> {
            Err(StagecacheError::loader("reader unavailable"))
        }

        fn writer(&self, _: &Path, _: &CacheLayout) -> CoreResult<Arc<dyn Transform>> {
            Err(StagecacheError::internal("writer unavailable"))
        }
    }

    #[test]
    fn test_factory_errors_propagate_unchanged() {
        let temp = TempDir::new().unwrap();
        let mut cache = StageCache::with_factory(
            CacheConfig::new(temp.path()),
            Arc::new(MemoryLoader::default()),
            Arc::new(Passthrough),
            Arc::new(BrokenFactory),
        );

        // No cache: the writer is needed.
        let err = cache.caching_preprocessing().unwrap_err();
        assert!(matches!(err, CacheError::Core(StagecacheError::Internal { .. })));
        // The original reader needs no factory.
        assert!(!cache.caching_reader().unwrap().is_cached());

        populate(temp.path(), 1);
        cache.refresh();
        let err = cache.caching_reader().unwrap_err();
        assert_eq!(err.to_string(), "Loader error: reader unavailable");
        assert!(cache.caching_preprocessing().unwrap().is_passthrough());
    }
}
