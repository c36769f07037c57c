//! The storage facade.

use crate::config::Config;
use crate::dump::{self, Dump};
use crate::error::{StorageError, StorageResult};
use crate::iter::{resolve_entry, Entries, Entry};
use crate::probe;
use crate::strategy::{ActiveBackend, CookieStore, EntryStore, LocalStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};
use webkv_codec::{decode_value, encode_component, encode_value, StorageKey};
use webkv_storage::{CookieBackend, KeyValueBackend};

/// Snapshot of a handle's cached capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// The local store passed its probe.
    pub local_store: bool,
    /// The cookie jar passed its probe.
    pub cookies: bool,
}

impl Capabilities {
    /// Returns `true` if either backend is usable.
    pub fn storage_available(&self) -> bool {
        self.local_store || self.cookies
    }
}

/// A key/value store that persists JSON values in the browser.
///
/// The handle owns a local store backend and a cookie backend, and routes
/// every operation to exactly one of them: the local store if it was
/// detected as supported, otherwise the cookie jar if that was, otherwise
/// nothing. Detection runs on construction and on [`refresh`]; between
/// refreshes the cached flags decide.
///
/// Reads and enumeration fail with [`StorageError::Unavailable`] when no
/// backend is usable. Writes return `Ok(false)` instead.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use webkv_core::BrowserStorage;
/// use webkv_storage::{InMemoryCookieJar, InMemoryKeyValue};
///
/// let storage = BrowserStorage::new(InMemoryKeyValue::new(), InMemoryCookieJar::new()).unwrap();
/// assert!(storage.storage_available());
///
/// assert!(storage.set("count", &42, Some(1)).unwrap());
/// assert_eq!(storage.get("count").unwrap(), Some(json!(42)));
///
/// assert!(storage.remove("count").unwrap());
/// assert_eq!(storage.get("count").unwrap(), None);
/// ```
///
/// [`refresh`]: BrowserStorage::refresh
pub struct BrowserStorage {
    local: Box<dyn KeyValueBackend>,
    cookies: Box<dyn CookieBackend>,
    config: Config,
    local_store_supported: bool,
    cookie_store_supported: bool,
    storage_available: bool,
}

impl BrowserStorage {
    /// Creates a handle with the default configuration and probes both
    /// backends.
    ///
    /// # Errors
    ///
    /// Returns an error if a probe hits an unexpected backend failure. A
    /// host without any usable storage is not an error.
    pub fn new(
        local: impl KeyValueBackend + 'static,
        cookies: impl CookieBackend + 'static,
    ) -> StorageResult<Self> {
        Self::with_backends(Config::default(), Box::new(local), Box::new(cookies))
    }

    /// Creates a handle with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a probe hits an unexpected backend failure.
    pub fn with_backends(
        config: Config,
        local: Box<dyn KeyValueBackend>,
        cookies: Box<dyn CookieBackend>,
    ) -> StorageResult<Self> {
        let mut storage = Self {
            local,
            cookies,
            config,
            local_store_supported: false,
            cookie_store_supported: false,
            storage_available: false,
        };
        storage.refresh()?;
        Ok(storage)
    }

    /// Re-probes both backends and replaces the cached flags.
    ///
    /// Call this when the environment may have changed, for example after
    /// the user changed privacy settings.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected backend failures during probing.
    pub fn refresh(&mut self) -> StorageResult<()> {
        let local_store = self.detect_key_value_support()?;
        let cookies = self.detect_cookie_support()?;
        self.force_capabilities(local_store, cookies);
        debug!(
            local_store,
            cookies,
            available = self.storage_available,
            "storage capabilities refreshed"
        );
        Ok(())
    }

    /// Probes the local store backend without touching the cached flags.
    ///
    /// # Errors
    ///
    /// See [`probe::detect_key_value_support`].
    pub fn detect_key_value_support(&self) -> StorageResult<bool> {
        probe::detect_key_value_support(self.local.as_ref(), &self.config)
    }

    /// Probes the cookie backend without touching the cached flags.
    ///
    /// # Errors
    ///
    /// See [`probe::detect_cookie_support`].
    pub fn detect_cookie_support(&self) -> StorageResult<bool> {
        probe::detect_cookie_support(self.cookies.as_ref(), &self.config)
    }

    /// Overrides the cached flags without probing.
    ///
    /// Useful for forcing the cookie fallback, or for simulating a host
    /// without storage.
    pub fn force_capabilities(&mut self, local_store: bool, cookies: bool) {
        self.local_store_supported = local_store;
        self.cookie_store_supported = cookies;
        self.storage_available = local_store || cookies;
    }

    /// Returns `true` if the local store was usable at the last refresh.
    pub fn local_store_supported(&self) -> bool {
        self.local_store_supported
    }

    /// Returns `true` if cookies were usable at the last refresh.
    pub fn cookie_store_supported(&self) -> bool {
        self.cookie_store_supported
    }

    /// Returns `true` if any backend was usable at the last refresh.
    pub fn storage_available(&self) -> bool {
        self.storage_available
    }

    /// Returns the cached flags.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            local_store: self.local_store_supported,
            cookies: self.cookie_store_supported,
        }
    }

    /// Returns the backend operations are currently routed to.
    pub fn active_backend(&self) -> Option<ActiveBackend> {
        if self.local_store_supported {
            Some(ActiveBackend::LocalStore)
        } else if self.cookie_store_supported {
            Some(ActiveBackend::Cookies)
        } else {
            None
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn store(&self) -> Option<Box<dyn EntryStore + '_>> {
        match self.active_backend()? {
            ActiveBackend::LocalStore => Some(Box::new(LocalStore::new(self.local.as_ref()))),
            ActiveBackend::Cookies => Some(Box::new(CookieStore::new(
                self.cookies.as_ref(),
                &self.config,
            ))),
        }
    }

    fn require_store(&self) -> StorageResult<Box<dyn EntryStore + '_>> {
        self.store().ok_or(StorageError::Unavailable)
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if no backend is usable, a
    /// backend error, or a codec error if the stored value is corrupted.
    pub fn get(&self, key: impl Into<StorageKey>) -> StorageResult<Option<Value>> {
        let store = self.require_store()?;
        let key = encode_component(key.into().as_str());
        trace!(backend = ?store.backend(), %key, "get");
        match store.read(&key)? {
            Some(raw) => Ok(decode_value(&raw)?),
            None => Ok(None),
        }
    }

    /// Reads the value stored under `key` into a typed value.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get), plus a codec error if the value does not
    /// deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: impl Into<StorageKey>) -> StorageResult<Option<T>> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| StorageError::Codec(err.into())),
            None => Ok(None),
        }
    }

    /// Stores `value` under `key`.
    ///
    /// `days_to_live` only affects cookies: `None` or `Some(0)` writes a
    /// session cookie, a positive count expires after that many days, and a
    /// negative count deletes the cookie. Returns `Ok(false)` if no backend
    /// is usable.
    ///
    /// # Errors
    ///
    /// Returns a codec error if the value is not representable as JSON, or a
    /// backend error if the write fails.
    pub fn set<V: Serialize + ?Sized>(
        &self,
        key: impl Into<StorageKey>,
        value: &V,
        days_to_live: Option<i64>,
    ) -> StorageResult<bool> {
        let Some(store) = self.store() else {
            return Ok(false);
        };
        let key = encode_component(key.into().as_str());
        let value = encode_value(value)?;
        trace!(backend = ?store.backend(), %key, ?days_to_live, "set");
        store.write(&key, &value, days_to_live)?;
        Ok(true)
    }

    /// Removes the entry stored under `key`.
    ///
    /// A cookie is removed by rewriting it with an expiry in the past.
    /// Returns `Ok(false)` if no backend is usable.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the removal fails.
    pub fn remove(&self, key: impl Into<StorageKey>) -> StorageResult<bool> {
        let Some(store) = self.store() else {
            return Ok(false);
        };
        let key = encode_component(key.into().as_str());
        trace!(backend = ?store.backend(), %key, "remove");
        store.delete(&key)?;
        Ok(true)
    }

    /// Removes every entry from the active backend.
    ///
    /// Returns `Ok(false)` if no backend is usable.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the wipe fails.
    pub fn clear(&self) -> StorageResult<bool> {
        let Some(store) = self.store() else {
            return Ok(false);
        };
        debug!(backend = ?store.backend(), "clearing storage");
        store.wipe()?;
        Ok(true)
    }

    /// Lists the stored keys in backend order.
    ///
    /// Keys are returned in their stored form, which equals the caller's
    /// key unless it contains characters that need percent-encoding.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if no backend is usable, or a
    /// backend error.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        self.require_store()?.keys()
    }

    /// Returns the key at `index` in [`keys`](Self::keys) order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if no backend is usable, or a
    /// backend error.
    pub fn key(&self, index: usize) -> StorageResult<Option<String>> {
        self.require_store()?.key_at(index)
    }

    /// Starts a pass over all entries of the active backend.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if no backend is usable, or a
    /// backend error if the keys cannot be listed.
    pub fn iter(&self) -> StorageResult<Entries<'_>> {
        Entries::new(self.require_store()?)
    }

    /// Resolves a single entry by its stored key, as returned by
    /// [`keys`](Self::keys).
    ///
    /// This is the per-item step of [`iter`](Self::iter), for callers that
    /// keep their own cursor over a key snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if no backend is usable, a
    /// backend error, or a codec error.
    pub fn entry(&self, stored_key: &str) -> StorageResult<Entry> {
        let store = self.require_store()?;
        resolve_entry(store.as_ref(), stored_key)
    }

    /// Dumps every cookie, whether or not cookies are the active backend.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the cookie string cannot be read.
    pub fn dump_cookies(&self, coerce: bool) -> StorageResult<Dump> {
        dump::dump_cookies(self.cookies.as_ref(), coerce)
    }

    /// Dumps every local store entry, whether or not the local store is the
    /// active backend.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the local store cannot be read.
    pub fn dump_local_store(&self, coerce: bool) -> StorageResult<Dump> {
        dump::dump_local_store(self.local.as_ref(), coerce)
    }
}

impl std::fmt::Debug for BrowserStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserStorage")
            .field("local_store_supported", &self.local_store_supported)
            .field("cookie_store_supported", &self.cookie_store_supported)
            .field("storage_available", &self.storage_available)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
