//! Per-backend entry stores.
//!
//! The facade encodes keys and values and then hands the stored form to one
//! of these stores. Each store maps the small entry protocol onto its
//! backend's native API.

use crate::config::Config;
use crate::error::StorageResult;
use chrono::{DateTime, Utc};
use webkv_codec::{cookie_names, find_value, CookieAssignment};
use webkv_storage::{CookieBackend, KeyValueBackend};

/// Stored form of the JSON empty string, written as the value of a cookie
/// being removed.
pub(crate) const ENCODED_EMPTY_STRING: &str = "%22%22";

/// The backend a handle routes operations to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveBackend {
    /// The host's local key-value store.
    LocalStore,
    /// The host's cookie jar.
    Cookies,
}

/// Entry protocol shared by both backends. Keys and values are already in
/// stored (percent-encoded) form.
pub(crate) trait EntryStore {
    fn backend(&self) -> ActiveBackend;

    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    fn write(&self, key: &str, value: &str, days_to_live: Option<i64>) -> StorageResult<()>;

    fn delete(&self, key: &str) -> StorageResult<()>;

    fn wipe(&self) -> StorageResult<()>;

    fn keys(&self) -> StorageResult<Vec<String>>;

    fn key_at(&self, index: usize) -> StorageResult<Option<String>>;
}

pub(crate) struct LocalStore<'a> {
    backend: &'a dyn KeyValueBackend,
}

impl<'a> LocalStore<'a> {
    pub(crate) fn new(backend: &'a dyn KeyValueBackend) -> Self {
        Self { backend }
    }
}

impl EntryStore for LocalStore<'_> {
    fn backend(&self) -> ActiveBackend {
        ActiveBackend::LocalStore
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.backend.get_item(key)?)
    }

    // Lifetimes only apply to cookies.
    fn write(&self, key: &str, value: &str, _days_to_live: Option<i64>) -> StorageResult<()> {
        Ok(self.backend.set_item(key, value)?)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        Ok(self.backend.remove_item(key)?)
    }

    fn wipe(&self) -> StorageResult<()> {
        Ok(self.backend.clear()?)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.backend.keys()?)
    }

    fn key_at(&self, index: usize) -> StorageResult<Option<String>> {
        Ok(self.backend.key(index)?)
    }
}

pub(crate) struct CookieStore<'a> {
    backend: &'a dyn CookieBackend,
    config: &'a Config,
}

impl<'a> CookieStore<'a> {
    pub(crate) fn new(backend: &'a dyn CookieBackend, config: &'a Config) -> Self {
        Self { backend, config }
    }
}

impl EntryStore for CookieStore<'_> {
    fn backend(&self) -> ActiveBackend {
        ActiveBackend::Cookies
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let cookie = self.backend.cookie()?;
        Ok(find_value(&cookie, key).map(str::to_string))
    }

    fn write(&self, key: &str, value: &str, days_to_live: Option<i64>) -> StorageResult<()> {
        let mut assignment = CookieAssignment::new(key, value).path(self.config.cookie_path.as_str());
        // Zero days is a session cookie, same as no lifetime.
        if let Some(days) = days_to_live.filter(|days| *days != 0) {
            assignment = assignment.expires(expiry_after_days(Utc::now(), days));
        }
        self.backend.set_cookie(&assignment.to_string())?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.write(key, ENCODED_EMPTY_STRING, Some(self.config.removal_lifetime()))
    }

    fn wipe(&self) -> StorageResult<()> {
        let cookie = self.backend.cookie()?;
        // Expire names exactly as the jar reports them.
        for name in cookie_names(&cookie) {
            self.delete(&name)?;
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let cookie = self.backend.cookie()?;
        Ok(cookie_names(&cookie))
    }

    fn key_at(&self, index: usize) -> StorageResult<Option<String>> {
        Ok(self.keys()?.into_iter().nth(index))
    }
}

/// Returns `now` shifted by a number of days, saturating at the bounds of
/// the representable range.
pub(crate) fn expiry_after_days(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    chrono::Duration::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
