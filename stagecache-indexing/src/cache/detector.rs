//! Cache state detection.
//!
//! A cache is usable when the schema descriptor is present and at least one
//! serialized document sits next to it. Nothing else is checked: the number of
//! cached documents and the preprocessing configuration that produced them are
//! not compared against the current run.

use stagecache_core::CacheLayout;
use std::io;
use std::path::{Path, PathBuf};

/// Whether a cache directory can serve documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheVerdict {
    /// Schema descriptor and at least one serialized document are present.
    Usable,
    /// The schema descriptor or every serialized document is missing.
    Unusable,
}

impl CacheVerdict {
    /// Check whether the verdict allows serving from the cache.
    pub fn is_usable(self) -> bool {
        matches!(self, Self::Usable)
    }
}

/// What a non-recursive listing of a cache directory found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheInventory {
    /// Whether the schema descriptor exists.
    pub schema_present: bool,
    /// Serialized-document entries, sorted by name.
    pub documents: Vec<PathBuf>,
}

impl CacheInventory {
    /// Number of serialized-document entries.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Derive the verdict from the inventory.
    pub fn verdict(&self) -> CacheVerdict {
        if self.schema_present && !self.documents.is_empty() {
            CacheVerdict::Usable
        } else {
            CacheVerdict::Unusable
        }
    }
}

/// List the cache artifacts in `directory`.
///
/// A missing directory yields an empty inventory rather than an error.
pub fn inspect(directory: &Path, layout: &CacheLayout) -> io::Result<CacheInventory> {
    if !directory.is_dir() {
        return Ok(CacheInventory::default());
    }

    let schema_present = layout.schema_path(directory).is_file();

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let is_document = entry
            .file_name()
            .to_str()
            .is_some_and(|name| layout.is_document_file(name));
        if is_document {
            documents.push(entry.path());
        }
    }
    documents.sort();

    Ok(CacheInventory {
        schema_present,
        documents,
    })
}

/// Report whether `directory` holds a usable cache.
///
/// No side effects; an empty or missing directory is `Unusable`.
///
/// # Examples
///
/// ```rust
/// use stagecache_core::CacheLayout;
/// use stagecache_indexing::cache::{detect, CacheVerdict};
///
/// let dir = tempfile::tempdir().unwrap();
/// let layout = CacheLayout::default();
/// assert_eq!(detect(dir.path(), &layout).unwrap(), CacheVerdict::Unusable);
///
/// std::fs::write(dir.path().join("typesystem.xml"), "{}").unwrap();
/// std::fs::write(dir.path().join("00000000.xmi"), "{}").unwrap();
/// assert_eq!(detect(dir.path(), &layout).unwrap(), CacheVerdict::Usable);
/// ```
pub fn detect(directory: &Path, layout: &CacheLayout) -> io::Result<CacheVerdict> {
    inspect(directory, layout).map(|inventory| inventory.verdict())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use test_case::test_case;

    fn directory_with(names: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for name in names {
            fs::write(temp.path().join(name), b"{}").unwrap();
        }
        temp
    }

    #[test_case(&[] => CacheVerdict::Unusable; "empty directory")]
    #[test_case(&["typesystem.xml"] => CacheVerdict::Unusable; "schema only")]
    #[test_case(&["00000000.xmi", "00000001.xmi"] => CacheVerdict::Unusable; "documents only")]
    #[test_case(&["typesystem.xml", "00000000.xmi"] => CacheVerdict::Usable; "schema and one document")]
    #[test_case(&["typesystem.xml", "a.xmi", "b.xmi", "c.xmi"] => CacheVerdict::Usable; "schema and three documents")]
    #[test_case(&["other.xml", "00000000.xmi"] => CacheVerdict::Unusable; "wrong schema name")]
    fn test_detect(names: &[&str]) -> CacheVerdict {
        let temp = directory_with(names);
        detect(temp.path(), &CacheLayout::default()).unwrap()
    }

    #[test]
    fn test_missing_directory_is_unusable() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("never-created");

        assert_eq!(
            detect(&missing, &CacheLayout::default()).unwrap(),
            CacheVerdict::Unusable
        );
        assert!(!missing.exists());
    }

    #[test]
    fn test_listing_is_not_recursive() {
        let temp = directory_with(&["typesystem.xml"]);
        let nested = temp.path().join("older.xmi");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("00000000.xmi"), b"{}").unwrap();

        let inventory = inspect(temp.path(), &CacheLayout::default()).unwrap();
        assert!(inventory.schema_present);
        assert_eq!(inventory.document_count(), 0);
        assert_eq!(inventory.verdict(), CacheVerdict::Unusable);
    }

    #[test]
    fn test_inventory_is_sorted() {
        let temp = directory_with(&["typesystem.xml", "00000002.xmi", "00000000.xmi"]);
        let inventory = inspect(temp.path(), &CacheLayout::default()).unwrap();

        let names: Vec<_> = inventory
            .documents
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["00000000.xmi", "00000002.xmi"]);
    }
}
