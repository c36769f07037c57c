//! In-memory key-value backend.

use crate::backend::KeyValueBackend;
use crate::error::{BackendError, BackendResult};
use parking_lot::RwLock;
use std::sync::Arc;

/// An in-memory local store.
///
/// Entries keep insertion order, like a browser's local store. Clones share
/// the same entries, so a test can hold one handle while the facade owns
/// another.
///
/// This backend is suitable for:
/// - Unit and integration tests
/// - Hosts without a browser local store
///
/// # Example
///
/// ```rust
/// use webkv_storage::{InMemoryKeyValue, KeyValueBackend};
///
/// let store = InMemoryKeyValue::new();
/// store.set_item("a", "1").unwrap();
/// assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
/// assert_eq!(store.keys().unwrap(), vec!["a"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValue {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    entries: Vec<(String, String)>,
    /// Maximum total bytes of keys and values.
    quota: Option<usize>,
    /// Simulates a host without the facility.
    absent: bool,
}

impl State {
    fn check_present(&self) -> BackendResult<()> {
        if self.absent {
            return Err(BackendError::unavailable("local store is not defined"));
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl InMemoryKeyValue {
    /// Creates a new empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that behaves as if the host had no local store.
    ///
    /// Every operation fails with [`BackendError::Unavailable`].
    #[must_use]
    pub fn absent() -> Self {
        let store = Self::new();
        store.set_absent(true);
        store
    }

    /// Creates a store that rejects writes beyond `bytes` in total.
    ///
    /// A quota of zero models private browsing modes where the store exists
    /// but cannot hold anything.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::new();
        store.state.write().quota = Some(bytes);
        store
    }

    /// Makes the facility disappear or reappear.
    pub fn set_absent(&self, absent: bool) {
        self.state.write().absent = absent;
    }

    /// Returns a copy of all entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.state.read().entries.clone()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }
}

impl KeyValueBackend for InMemoryKeyValue {
    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        state.check_present()?;

        if let Some(quota) = state.quota {
            if state.used_bytes_without(key) + key.len() + value.len() > quota {
                return Err(BackendError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        match state.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => state.entries.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        let state = self.state.read();
        state.check_present()?;
        Ok(state
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        state.check_present()?;
        state.entries.retain(|(k, _)| k != key);
        Ok(())
    }

    fn clear(&self) -> BackendResult<()> {
        let mut state = self.state.write();
        state.check_present()?;
        state.entries.clear();
        Ok(())
    }

    fn key(&self, index: usize) -> BackendResult<Option<String>> {
        let state = self.state.read();
        state.check_present()?;
        Ok(state.entries.get(index).map(|(k, _)| k.clone()))
    }

    fn keys(&self) -> BackendResult<Vec<String>> {
        let state = self.state.read();
        state.check_present()?;
        Ok(state.entries.iter().map(|(k, _)| k.clone()).collect())
    }
}
