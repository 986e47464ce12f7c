//! Property-based tests for the cache directory guard and detector.

use proptest::prelude::*;
use stagecache_core::CacheLayout;
use stagecache_indexing::cache::{detect, ensure_clean, inspect, CacheVerdict};
use stagecache_indexing::error::GuardError;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn stray_names() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[a-z0-9_]{1,10}\\.(txt|log|tmp|json|md|xmil)", 1..6)
}

fn artifact_names() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set("[a-z0-9_]{1,10}\\.(xmi|xml)", 0..6)
}

proptest! {
    #[test]
    fn test_unrecognized_files_always_pollute(
        strays in stray_names(),
        artifacts in artifact_names(),
    ) {
        let temp = TempDir::new().unwrap();
        for name in strays.iter().chain(artifacts.iter()) {
            fs::write(temp.path().join(name), b"").unwrap();
        }

        match ensure_clean(temp.path(), &CacheLayout::default()) {
            Err(GuardError::Polluted { count, entries, .. }) => {
                prop_assert_eq!(count, strays.len());
                prop_assert_eq!(entries.len(), strays.len());
                let mut sorted = entries.clone();
                sorted.sort();
                prop_assert_eq!(sorted, entries);
            }
            other => prop_assert!(false, "expected pollution, got {:?}", other),
        }
    }

    #[test]
    fn test_artifacts_never_pollute(artifacts in artifact_names()) {
        let temp = TempDir::new().unwrap();
        for name in &artifacts {
            fs::write(temp.path().join(name), b"").unwrap();
        }

        let layout = CacheLayout::default();
        prop_assert!(ensure_clean(temp.path(), &layout).is_ok());
        // Running the guard again changes nothing.
        prop_assert!(ensure_clean(temp.path(), &layout).is_ok());
        prop_assert_eq!(fs::read_dir(temp.path()).unwrap().count(), artifacts.len());
    }

    #[test]
    fn test_usable_iff_schema_and_documents(
        schema in any::<bool>(),
        documents in 0usize..5,
        // Shorter than the schema name, so never a collision.
        extras in prop::collection::hash_set("[a-z]{1,6}\\.xml", 0..3),
    ) {
        let temp = TempDir::new().unwrap();
        let layout = CacheLayout::default();
        if schema {
            fs::write(layout.schema_path(temp.path()), b"{}").unwrap();
        }
        for i in 0..documents {
            fs::write(temp.path().join(layout.document_file_name(i)), b"{}").unwrap();
        }
        for name in &extras {
            fs::write(temp.path().join(name), b"").unwrap();
        }

        let inventory = inspect(temp.path(), &layout).unwrap();
        prop_assert_eq!(inventory.schema_present, schema);
        prop_assert_eq!(inventory.document_count(), documents);

        let expected = if schema && documents > 0 {
            CacheVerdict::Usable
        } else {
            CacheVerdict::Unusable
        };
        prop_assert_eq!(detect(temp.path(), &layout).unwrap(), expected);
    }
}
