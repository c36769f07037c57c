//! Backend trait definitions.

use crate::error::BackendResult;

/// A durable, synchronous string-to-string map provided by the host.
///
/// This is the contract of a browser's local store. Implementations use
/// interior mutability: the store is shared state that other code in the
/// same environment may read and write at any time.
///
/// # Invariants
///
/// - `get_item` returns exactly the last value passed to `set_item` for that
///   key, or `None` after `remove_item`/`clear`
/// - `keys` and `key` agree on ordering
///
/// # Implementors
///
/// - [`super::InMemoryKeyValue`] - For testing and non-browser hosts
pub trait KeyValueBackend {
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or the write exceeds the
    /// quota.
    fn set_item(&self, key: &str, value: &str) -> BackendResult<()>;

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn get_item(&self, key: &str) -> BackendResult<Option<String>>;

    /// Deletes `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn remove_item(&self, key: &str) -> BackendResult<()>;

    /// Deletes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn clear(&self) -> BackendResult<()>;

    /// Returns the key at `index` in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn key(&self, index: usize) -> BackendResult<Option<String>>;

    /// Returns every key in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn keys(&self) -> BackendResult<Vec<String>>;
}

/// The host's cookie jar, seen through a single string property.
///
/// Reading yields every live cookie as `name=value` pairs joined by `"; "`.
/// Writing takes one assignment such as
/// `name=value; expires=<HTTP-date>; path=/`, which creates, updates, or (with
/// an expiry in the past) deletes one cookie.
///
/// # Implementors
///
/// - [`super::InMemoryCookieJar`] - For testing and non-browser hosts
pub trait CookieBackend {
    /// Returns the current cookie string.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie jar cannot be read.
    fn cookie(&self) -> BackendResult<String>;

    /// Applies one cookie assignment.
    ///
    /// A host that blocks cookies may accept the assignment and ignore it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie jar cannot be written.
    fn set_cookie(&self, assignment: &str) -> BackendResult<()>;

    /// Returns the host's "cookies enabled" signal, if it has one.
    fn cookies_enabled(&self) -> Option<bool> {
        None
    }
}
