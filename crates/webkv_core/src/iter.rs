//! Entry iteration.

use crate::error::StorageResult;
use crate::strategy::EntryStore;
use serde::Serialize;
use serde_json::Value;
use std::iter::FusedIterator;
use webkv_codec::{decode_component, decode_value};

/// One stored entry as yielded by [`crate::BrowserStorage::iter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// The decoded key.
    pub key: String,
    /// The decoded value; `None` if the entry vanished or holds the
    /// `undefined` sentinel.
    pub value: Option<Value>,
}

/// A single pass over the entries of the active backend.
///
/// The key list is captured when the iterator is created. Each value is
/// fetched from the backend when its entry is pulled, so an entry removed in
/// the meantime yields a `None` value. Every call to
/// [`crate::BrowserStorage::iter`] starts a fresh pass.
///
/// Works as a pull cursor and in a `for` loop:
///
/// ```rust
/// use webkv_core::BrowserStorage;
/// use webkv_storage::{InMemoryCookieJar, InMemoryKeyValue};
///
/// let storage = BrowserStorage::new(InMemoryKeyValue::new(), InMemoryCookieJar::new()).unwrap();
/// storage.set("a", &1, None).unwrap();
/// storage.set("b", &2, None).unwrap();
///
/// let mut cursor = storage.iter().unwrap();
/// assert_eq!(cursor.next().unwrap().unwrap().key, "a");
///
/// for entry in storage.iter().unwrap() {
///     let entry = entry.unwrap();
///     assert!(entry.value.is_some());
/// }
/// ```
pub struct Entries<'a> {
    store: Box<dyn EntryStore + 'a>,
    keys: std::vec::IntoIter<String>,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(store: Box<dyn EntryStore + 'a>) -> StorageResult<Self> {
        let keys = store.keys()?;
        Ok(Self {
            store,
            keys: keys.into_iter(),
        })
    }
}

/// Reads and decodes the entry stored under `raw_key`.
pub(crate) fn resolve_entry(store: &dyn EntryStore, raw_key: &str) -> StorageResult<Entry> {
    let key = decode_component(raw_key)?;
    let value = match store.read(raw_key)? {
        Some(raw) => decode_value(&raw)?,
        None => None,
    };
    Ok(Entry { key, value })
}

impl Iterator for Entries<'_> {
    type Item = StorageResult<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw_key = self.keys.next()?;
        Some(resolve_entry(self.store.as_ref(), &raw_key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl FusedIterator for Entries<'_> {}

impl std::fmt::Debug for Entries<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entries")
            .field("backend", &self.store.backend())
            .field("remaining", &self.keys.len())
            .finish()
    }
}
