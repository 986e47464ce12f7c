//! Configuration for the stage cache.
//!
//! [`CacheConfig`] is the explicit value object a caller hands to the stage
//! selector: whether caching is enabled, where the cache lives, and which
//! file names count as cache artifacts ([`CacheLayout`]).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Result, StagecacheError};

/// Default location of the cache directory.
pub const DEFAULT_CACHE_DIRECTORY: &str = "./target/stage-cache";

/// Default name of the schema descriptor inside the cache directory.
pub const DEFAULT_SCHEMA_FILE_NAME: &str = "typesystem.xml";

/// Default extension of serialized-document entries.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "xmi";

/// Environment variable toggling the cache on or off.
pub const ENV_ENABLED: &str = "STAGECACHE_ENABLED";

/// Environment variable overriding the cache directory.
pub const ENV_DIRECTORY: &str = "STAGECACHE_DIR";

/// File naming rules of a cache directory.
///
/// A directory entry is a recognized cache artifact when its name ends with
/// one of `recognized_suffixes`. Both the schema descriptor and the document
/// extension must themselves be recognized, otherwise the cache writer would
/// pollute its own directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheLayout {
    /// Well-known name of the schema descriptor.
    pub schema_file_name: String,

    /// Extension (without the dot) of serialized-document entries.
    pub document_extension: String,

    /// Name suffixes that mark an entry as a cache artifact.
    pub recognized_suffixes: Vec<String>,
}

impl Default for CacheLayout {
    fn default() -> Self {
        Self {
            schema_file_name: DEFAULT_SCHEMA_FILE_NAME.to_string(),
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
            recognized_suffixes: vec!["xmi".to_string(), "xml".to_string()],
        }
    }
}

impl CacheLayout {
    /// Build the regular expression matching recognized artifact names.
    ///
    /// For the default layout this is `^.*(xmi|xml)$`; the whole name must match.
    pub fn artifact_regex(&self) -> Result<Regex> {
        if self.recognized_suffixes.is_empty() {
            return Err(StagecacheError::configuration(
                "cache layout must recognize at least one suffix",
            ));
        }

        let alternatives = self
            .recognized_suffixes
            .iter()
            .map(|suffix| regex::escape(suffix))
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&format!("^.*({alternatives})$")).map_err(|e| {
            StagecacheError::configuration(format!("invalid artifact pattern: {e}"))
        })
    }

    /// Human-readable list of recognized suffixes, e.g. `'xmi' or 'xml'`.
    pub fn suffix_description(&self) -> String {
        self.recognized_suffixes
            .iter()
            .map(|s| format!("'{s}'"))
            .collect::<Vec<_>>()
            .join(" or ")
    }

    /// Check whether `file_name` is a serialized-document entry.
    pub fn is_document_file(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.document_extension)
    }

    /// Path of the schema descriptor inside `directory`.
    pub fn schema_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.schema_file_name)
    }

    /// File name of the `index`-th serialized document.
    pub fn document_file_name(&self, index: usize) -> String {
        format!("{index:08}.{}", self.document_extension)
    }

    /// Validate the layout.
    pub fn validate(&self) -> Result<()> {
        if self.schema_file_name.trim().is_empty() {
            return Err(StagecacheError::configuration(
                "schema file name cannot be empty",
            ));
        }

        if self.schema_file_name.contains(['/', '\\']) {
            return Err(StagecacheError::configuration(format!(
                "schema file name must be a plain file name: {}",
                self.schema_file_name
            )));
        }

        if self.document_extension.trim().is_empty() || self.document_extension.starts_with('.') {
            return Err(StagecacheError::configuration(format!(
                "document extension must be non-empty and given without a dot: {:?}",
                self.document_extension
            )));
        }

        let pattern = self.artifact_regex()?;
        if !pattern.is_match(&self.schema_file_name) {
            return Err(StagecacheError::configuration(format!(
                "schema file name {} does not end with {}",
                self.schema_file_name,
                self.suffix_description()
            )));
        }

        let sample = self.document_file_name(0);
        if !pattern.is_match(&sample) {
            return Err(StagecacheError::configuration(format!(
                "document extension {} does not end with {}",
                self.document_extension,
                self.suffix_description()
            )));
        }

        if self.is_document_file(&self.schema_file_name) {
            return Err(StagecacheError::configuration(format!(
                "schema file name {} collides with the document extension",
                self.schema_file_name
            )));
        }

        Ok(())
    }
}

/// Configuration of the stage cache.
///
/// # Examples
///
/// ```rust
/// use stagecache_core::config::CacheConfig;
///
/// let config = CacheConfig::new("/tmp/ner-cache").with_enabled(false);
/// assert!(!config.enabled);
/// assert_eq!(config.layout.schema_file_name, "typesystem.xml");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether cached results may be served.
    pub enabled: bool,

    /// Cache directory.
    pub directory: PathBuf,

    /// File naming rules inside the directory.
    pub layout: CacheLayout,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(DEFAULT_CACHE_DIRECTORY),
            layout: CacheLayout::default(),
        }
    }
}

impl CacheConfig {
    /// Create an enabled configuration for the given directory.
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Set whether caching is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the cache directory.
    #[must_use]
    pub fn with_directory<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the file layout.
    #[must_use]
    pub fn with_layout(mut self, layout: CacheLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            StagecacheError::configuration(format!("Failed to parse cache config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StagecacheError::configuration(format!(
                "Failed to read cache config {}: {e}",
                path.display()
            ))
        })?;
        debug!("Loaded cache config from {}", path.display());
        Self::from_json_str(&content)
    }

    /// Apply `STAGECACHE_ENABLED` and `STAGECACHE_DIR` from the environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ENABLED) {
            self.enabled = parse_bool(&raw).ok_or_else(|| {
                StagecacheError::configuration(format!("{ENV_ENABLED} is not a boolean: {raw}"))
            })?;
            debug!(enabled = self.enabled, "Cache toggle overridden from environment");
        }

        if let Some(dir) = lookup(ENV_DIRECTORY) {
            if !dir.trim().is_empty() {
                self.directory = PathBuf::from(dir);
                debug!(directory = %self.directory.display(), "Cache directory overridden from environment");
            }
        }

        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(StagecacheError::configuration(
                "cache directory cannot be empty",
            ));
        }

        self.layout.validate()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
