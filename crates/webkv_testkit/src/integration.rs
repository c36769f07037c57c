//! Cross-crate integration test helpers.
//!
//! Provides a model-checking harness that mirrors every facade write in a
//! plain map, plus reusable verification routines.

use crate::fixtures::{StorageMode, TestStorage};
use crate::generators::StorageOperation;
use serde_json::Value;
use std::collections::BTreeMap;
use webkv_codec::encode_component;
use webkv_core::BrowserStorage;

/// A test harness that checks the facade against a model.
pub struct IntegrationHarness {
    /// The fixture under test.
    pub fixture: TestStorage,
    /// Expected contents, keyed by caller key.
    model: BTreeMap<String, Value>,
}

impl IntegrationHarness {
    /// Creates a harness in the given mode.
    pub fn new(mode: StorageMode) -> Self {
        Self {
            fixture: TestStorage::new(mode),
            model: BTreeMap::new(),
        }
    }

    /// Applies one operation to both the facade and the model.
    pub fn apply(&mut self, op: &StorageOperation) {
        match op {
            StorageOperation::Set {
                key,
                value,
                days_to_live,
            } => {
                let written = self
                    .fixture
                    .set(key.as_str(), value, *days_to_live)
                    .expect("Failed to set entry");
                assert!(written, "set reported no storage");
                self.model.insert(key.clone(), value.clone());
            }
            StorageOperation::Remove { key } => {
                self.fixture
                    .remove(key.as_str())
                    .expect("Failed to remove entry");
                self.model.remove(key);
            }
            StorageOperation::Clear => {
                self.fixture.clear().expect("Failed to clear storage");
                self.model.clear();
            }
        }
    }

    /// Verifies every model entry reads back and no extra keys exist.
    pub fn verify_all(&self) {
        for (key, expected) in &self.model {
            let actual = self.fixture.get(key.as_str()).expect("Failed to get entry");
            assert_eq!(actual.as_ref(), Some(expected), "Entry mismatch for {key:?}");
        }

        let mut stored = self.fixture.keys().expect("Failed to list keys");
        stored.sort();
        let mut expected: Vec<String> = self.model.keys().map(|k| encode_component(k)).collect();
        expected.sort();
        assert_eq!(stored, expected, "Key set mismatch");
    }

    /// Returns the count of tracked entries.
    pub fn tracked_count(&self) -> usize {
        self.model.len()
    }
}

/// Reusable verification routines.
pub mod verification {
    use super::*;

    /// Verifies that a stored value reads back unchanged.
    pub fn test_round_trip(storage: &BrowserStorage, key: &str, value: &Value) {
        assert!(storage.set(key, value, Some(1)).expect("Failed to set"));
        assert_eq!(
            storage.get(key).expect("Failed to get").as_ref(),
            Some(value),
            "Round trip failed for {key:?}"
        );
    }

    /// Verifies that clearing twice leaves an empty store both times.
    pub fn test_clear_idempotent(storage: &BrowserStorage) {
        assert!(storage.clear().expect("Failed to clear"));
        assert!(storage.keys().expect("Failed to list keys").is_empty());
        assert!(storage.clear().expect("Failed to clear again"));
        assert!(storage.keys().expect("Failed to list keys").is_empty());
    }

    /// Verifies that a removed key reads as missing.
    pub fn test_removal(storage: &BrowserStorage, key: &str) {
        storage.set(key, &true, None).expect("Failed to set");
        assert!(storage.remove(key).expect("Failed to remove"));
        assert_eq!(storage.get(key).expect("Failed to get"), None);
    }

    /// Verifies that iteration yields exactly the stored keys, each with the
    /// value `get` returns for it.
    pub fn test_iteration_complete(storage: &BrowserStorage) {
        let keys = storage.keys().expect("Failed to list keys");
        let entries: Vec<_> = storage
            .iter()
            .expect("Failed to start iteration")
            .collect::<Result<_, _>>()
            .expect("Failed to read entry");

        assert_eq!(entries.len(), keys.len());
        for (entry, raw_key) in entries.iter().zip(&keys) {
            assert_eq!(&encode_component(&entry.key), raw_key);
            assert_eq!(
                entry.value,
                storage.get(entry.key.as_str()).expect("Failed to get"),
                "Iteration mismatch for {:?}",
                entry.key
            );
        }
    }

    /// Verifies the behavior of a handle without storage.
    pub fn test_unavailable(storage: &BrowserStorage) {
        assert!(!storage.storage_available());
        assert!(storage.get("k").unwrap_err().is_unavailable());
        assert!(storage.keys().unwrap_err().is_unavailable());
        assert!(storage.iter().unwrap_err().is_unavailable());
        assert!(!storage.set("k", &1, Some(3)).expect("set must not fail"));
        assert!(!storage.remove("k").expect("remove must not fail"));
        assert!(!storage.clear().expect("clear must not fail"));
    }
}
