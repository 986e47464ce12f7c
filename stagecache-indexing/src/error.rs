//! Error types for cache setup.

use std::path::PathBuf;
use thiserror::Error;

use stagecache_core::StagecacheError;

/// Errors raised while checking that a cache directory only holds cache artifacts.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The directory contains entries that are not recognized cache artifacts.
    #[error("The cache directory contains [{count}] file(s) without suffix {suffixes}")]
    Polluted {
        /// Number of offending entries.
        count: usize,
        /// Recognized suffixes, formatted for display.
        suffixes: String,
        /// Paths of the offending entries, sorted.
        entries: Vec<PathBuf>,
    },

    /// The cache layout cannot be turned into an artifact pattern.
    #[error("Invalid cache layout: {message}")]
    InvalidLayout {
        /// Error message describing the layout issue.
        message: String,
    },

    /// IO error while creating or listing the directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while selecting pipeline stages.
///
/// Everything here surfaces at pipeline setup time, before any document
/// flows. Errors from collaborator stages are carried unchanged in
/// [`CacheError::Core`].
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache directory could not be prepared or is polluted.
    #[error("Failed to initialize cache directory {}: {source}", directory.display())]
    ResourceInitialization {
        /// The configured cache directory.
        directory: PathBuf,
        /// What went wrong.
        #[source]
        source: GuardError,
    },

    /// Error raised by configuration or by a collaborator stage.
    #[error(transparent)]
    Core(#[from] StagecacheError),
}

/// Result type alias for cache setup operations.
pub type Result<T> = std::result::Result<T, CacheError>;

impl CacheError {
    /// Create a resource initialization error for `directory`.
    pub fn resource_initialization<P: Into<PathBuf>>(directory: P, source: GuardError) -> Self {
        Self::ResourceInitialization {
            directory: directory.into(),
            source,
        }
    }

    /// Number of polluting entries, if this error reports a polluted directory.
    #[must_use]
    pub fn polluting_file_count(&self) -> Option<usize> {
        match self {
            Self::ResourceInitialization {
                source: GuardError::Polluted { count, .. },
                ..
            } => Some(*count),
            _ => None,
        }
    }

    /// Check if this error comes from preparing the cache directory.
    #[must_use]
    pub fn is_resource_initialization(&self) -> bool {
        matches!(self, Self::ResourceInitialization { .. })
    }
}

// Convert to StagecacheError for callers that only deal in core results
impl From<CacheError> for StagecacheError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Core(e) => e,
            CacheError::ResourceInitialization {
                source: GuardError::Io(e),
                ..
            } => Self::Io(e),
            other @ CacheError::ResourceInitialization { .. } => {
                Self::pipeline(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polluted(count: usize) -> CacheError {
        CacheError::resource_initialization(
            "/tmp/cache",
            GuardError::Polluted {
                count,
                suffixes: "'xmi' or 'xml'".to_string(),
                entries: Vec::new(),
            },
        )
    }

    #[test]
    fn test_polluted_message_names_count() {
        let err = polluted(2);
        assert_eq!(err.polluting_file_count(), Some(2));
        assert!(err.is_resource_initialization());
        assert_eq!(
            err.to_string(),
            "Failed to initialize cache directory /tmp/cache: \
             The cache directory contains [2] file(s) without suffix 'xmi' or 'xml'"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: CacheError = StagecacheError::loader("unreachable corpus").into();
        assert_eq!(err.to_string(), "Loader error: unreachable corpus");
        assert_eq!(err.polluting_file_count(), None);

        let core: StagecacheError = err.into();
        assert!(matches!(core, StagecacheError::Loader { .. }));
    }

    #[test]
    fn test_conversion_to_core() {
        let core: StagecacheError = polluted(1).into();
        assert!(matches!(core, StagecacheError::Pipeline { .. }));
    }
}
