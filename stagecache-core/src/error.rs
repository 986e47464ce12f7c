//! Error types for the stagecache framework.
//!
//! Every stage (loader, transform, cache writer or reader) reports failures
//! through [`StagecacheError`]. Cache-setup failures that are specific to the
//! cache directory live in the indexing crate and convert into this type.

use thiserror::Error;

/// Core error types for stagecache.
///
/// This enum covers the error conditions that document sources and
/// preprocessing stages can run into while a pipeline is set up or executed.
#[derive(Error, Debug)]
pub enum StagecacheError {
    /// I/O related errors (file reading, directory listing, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Document loading errors
    #[error("Loader error: {message}")]
    Loader {
        /// Detailed error message
        message: String,
    },

    /// Preprocessing stage errors
    #[error("Transform error: {message}")]
    Transform {
        /// Detailed error message
        message: String,
    },

    /// Pipeline execution errors
    #[error("Pipeline error: {message}")]
    Pipeline {
        /// Detailed error message
        message: String,
    },

    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Detailed error message
        message: String,
    },

    /// Resource not found errors
    #[error("Not found: {resource}")]
    NotFound {
        /// Name of the missing resource
        resource: String,
    },

    /// Internal framework errors
    #[error("Internal error: {message}")]
    Internal {
        /// Detailed error message
        message: String,
    },

    /// Generic errors from external dependencies
    #[error("External error: {source}")]
    External {
        /// The underlying error
        #[source]
        source: anyhow::Error,
    },
}

impl StagecacheError {
    /// Create a new loader error with a message.
    pub fn loader<S: Into<String>>(message: S) -> Self {
        Self::Loader {
            message: message.into(),
        }
    }

    /// Create a new transform error with a message.
    pub fn transform<S: Into<String>>(message: S) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    /// Create a new pipeline error with a message.
    pub fn pipeline<S: Into<String>>(message: S) -> Self {
        Self::Pipeline {
            message: message.into(),
        }
    }

    /// Create a new configuration error with a message.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new not found error with a resource name.
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new internal error with a message.
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new external error from any error that implements `Into<anyhow::Error>`.
    pub fn external<E: Into<anyhow::Error>>(error: E) -> Self {
        Self::External {
            source: error.into(),
        }
    }

    /// Check if this error is a client error.
    ///
    /// Returns `true` for errors caused by invalid input or configuration
    /// that won't be fixed by running the pipeline again.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::NotFound { .. }
        )
    }
}

/// Convert from `anyhow::Error` to `StagecacheError`.
impl From<anyhow::Error> for StagecacheError {
    fn from(error: anyhow::Error) -> Self {
        Self::External { source: error }
    }
}

/// Result type alias for convenience.
///
/// This is the standard result type used throughout stagecache.
pub type Result<T> = std::result::Result<T, StagecacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = StagecacheError::transform("tokenizer crashed");
        assert!(matches!(err, StagecacheError::Transform { .. }));
        assert_eq!(err.to_string(), "Transform error: tokenizer crashed");
    }

    #[test]
    fn test_error_client_error() {
        assert!(StagecacheError::configuration("empty directory").is_client_error());
        assert!(StagecacheError::not_found("typesystem.xml").is_client_error());
        assert!(!StagecacheError::loader("unreadable source").is_client_error());
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: StagecacheError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, StagecacheError::External { .. }));
        assert_eq!(err.to_string(), "External error: boom");
    }
}
