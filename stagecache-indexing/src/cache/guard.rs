//! Cache directory guard.
//!
//! Runs before the cache state is inspected: the directory may hold nothing
//! but cache artifacts, otherwise setup fails.

use regex::Regex;
use stagecache_core::CacheLayout;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::GuardError;

/// Ensure `directory` exists and contains only recognized cache artifacts.
///
/// The directory (and any missing parent) is created if absent. Every entry of
/// a non-recursive listing, sub-directories included, must match the layout's
/// artifact pattern.
///
/// # Errors
///
/// Returns [`GuardError::Polluted`] naming the number of unrecognized entries,
/// or [`GuardError::Io`] if the directory cannot be created or listed.
///
/// # Examples
///
/// ```rust
/// use stagecache_core::CacheLayout;
/// use stagecache_indexing::cache::ensure_clean;
///
/// let dir = tempfile::tempdir().unwrap();
/// let cache_dir = dir.path().join("cache");
///
/// ensure_clean(&cache_dir, &CacheLayout::default()).unwrap();
/// assert!(cache_dir.is_dir());
/// ```
pub fn ensure_clean(directory: &Path, layout: &CacheLayout) -> Result<(), GuardError> {
    let pattern = layout
        .artifact_regex()
        .map_err(|e| GuardError::InvalidLayout {
            message: e.to_string(),
        })?;

    std::fs::create_dir_all(directory)?;

    let polluting = polluting_entries(directory, &pattern)?;
    if !polluting.is_empty() {
        warn!(
            directory = %directory.display(),
            count = polluting.len(),
            "Cache directory contains unrecognized entries"
        );
        return Err(GuardError::Polluted {
            count: polluting.len(),
            suffixes: layout.suffix_description(),
            entries: polluting,
        });
    }

    debug!("Cache directory {} is clean", directory.display());
    Ok(())
}

/// List the entries of `directory` whose names do not match `pattern`.
fn polluting_entries(directory: &Path, pattern: &Regex) -> Result<Vec<PathBuf>, GuardError> {
    let mut polluting = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let name = entry.file_name();
        // Non UTF-8 names can never match.
        let recognized = name.to_str().is_some_and(|n| pattern.is_match(n));
        if !recognized {
            polluting.push(entry.path());
        }
    }

    polluting.sort();
    Ok(polluting)
}
