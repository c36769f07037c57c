//! `localStorage` backend.

use super::map_js_error;
use web_sys::Storage;
use webkv_storage::{BackendError, BackendResult, KeyValueBackend};

/// The window's `localStorage`.
///
/// Reading `window.localStorage` itself throws in some privacy modes; that
/// case is treated the same as a missing store.
#[derive(Debug, Clone)]
pub struct WebLocalStorage {
    storage: Option<Storage>,
}

impl WebLocalStorage {
    /// Resolves `window.localStorage`.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    /// Returns `true` if a store object was found.
    pub fn is_present(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> BackendResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| BackendError::unavailable("localStorage is not defined"))
    }
}

impl Default for WebLocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for WebLocalStorage {
    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| map_js_error(err, Some(key)))
    }

    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| map_js_error(err, Some(key)))
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| map_js_error(err, Some(key)))
    }

    fn clear(&self) -> BackendResult<()> {
        self.storage()?.clear().map_err(|err| map_js_error(err, None))
    }

    fn key(&self, index: usize) -> BackendResult<Option<String>> {
        let Ok(index) = u32::try_from(index) else {
            return Ok(None);
        };
        self.storage()?
            .key(index)
            .map_err(|err| map_js_error(err, None))
    }

    fn keys(&self) -> BackendResult<Vec<String>> {
        let storage = self.storage()?;
        let length = storage.length().map_err(|err| map_js_error(err, None))?;
        let mut keys = Vec::with_capacity(length as usize);
        for index in 0..length {
            if let Some(key) = storage.key(index).map_err(|err| map_js_error(err, None))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
