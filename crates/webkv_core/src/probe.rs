//! Capability probes.
//!
//! A probe writes a throwaway entry, checks that it can be read back, and
//! removes it again. The removal is owned by a guard, so the probe entry is
//! released on every exit path, including early returns and propagated
//! errors.

use crate::config::Config;
use crate::error::StorageResult;
use crate::strategy::expiry_after_days;
use chrono::Utc;
use tracing::{debug, warn};
use webkv_codec::{find_value, CookieAssignment};
use webkv_storage::{BackendError, CookieBackend, KeyValueBackend};

const PROBE_VALUE: &str = "true";

struct ProbeKey<'a> {
    backend: &'a dyn KeyValueBackend,
    key: &'a str,
}

impl Drop for ProbeKey<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.remove_item(self.key) {
            log_release_failure("local store", self.key, &err);
        }
    }
}

struct ProbeCookie<'a> {
    backend: &'a dyn CookieBackend,
    config: &'a Config,
}

impl Drop for ProbeCookie<'_> {
    fn drop(&mut self) {
        let assignment = CookieAssignment::new(self.config.probe_cookie.as_str(), "")
            .expires(expiry_after_days(Utc::now(), self.config.removal_lifetime()))
            .path(self.config.cookie_path.as_str());
        if let Err(err) = self.backend.set_cookie(&assignment.to_string()) {
            log_release_failure("cookie", &self.config.probe_cookie, &err);
        }
    }
}

fn log_release_failure(backend: &str, key: &str, err: &BackendError) {
    if err.is_feature_absent() {
        debug!(backend, key, %err, "probe release skipped");
    } else {
        warn!(backend, key, %err, "failed to release probe entry");
    }
}

/// Tests whether the local store accepts a write.
///
/// Returns `Ok(false)` when the probe write fails with a "feature absent"
/// error ([`BackendError::is_feature_absent`]) or the probe value does not
/// read back. Every other backend error is returned.
///
/// # Errors
///
/// Returns an error for unexpected backend failures.
pub fn detect_key_value_support(
    backend: &dyn KeyValueBackend,
    config: &Config,
) -> StorageResult<bool> {
    let probe = ProbeKey {
        backend,
        key: &config.probe_key,
    };

    match backend.set_item(probe.key, PROBE_VALUE) {
        Ok(()) => {}
        Err(err) if err.is_feature_absent() => {
            debug!(%err, "local store probe write rejected");
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    }

    let read_back = backend.get_item(probe.key)?;
    Ok(read_back.as_deref() == Some(PROBE_VALUE))
}

/// Tests whether the cookie jar keeps a cookie.
///
/// A host signal of "cookies enabled" short-circuits to `true` when
/// [`Config::trust_cookies_enabled`] is set. Otherwise a probe cookie with a
/// short lifetime is written and then expired, and the result is whether the
/// first write showed up in the cookie string.
///
/// # Errors
///
/// Returns an error for unexpected backend failures.
pub fn detect_cookie_support(backend: &dyn CookieBackend, config: &Config) -> StorageResult<bool> {
    if config.trust_cookies_enabled && backend.cookies_enabled() == Some(true) {
        return Ok(true);
    }

    let _probe = ProbeCookie { backend, config };
    let ttl = chrono::Duration::from_std(config.probe_cookie_ttl)
        .unwrap_or_else(|_| chrono::Duration::seconds(60));
    let assignment = CookieAssignment::new(config.probe_cookie.as_str(), PROBE_VALUE)
        .expires(Utc::now() + ttl)
        .path(config.cookie_path.as_str());

    let cookie = match backend
        .set_cookie(&assignment.to_string())
        .and_then(|()| backend.cookie())
    {
        Ok(cookie) => cookie,
        Err(err) if err.is_feature_absent() => {
            debug!(%err, "cookie probe rejected");
            return Ok(false);
        }
        Err(err) => return Err(err.into()),
    };

    Ok(find_value(&cookie, &config.probe_cookie) == Some(PROBE_VALUE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::cell::RefCell;
    use webkv_storage::{BackendResult, InMemoryCookieJar, InMemoryKeyValue};

    /// Local store whose individual operations can be made to fail.
    #[derive(Default)]
    struct FaultyKeyValue {
        inner: InMemoryKeyValue,
        write_error: Option<BackendError>,
        read_error: Option<BackendError>,
        removals: RefCell<Vec<String>>,
    }

    impl KeyValueBackend for FaultyKeyValue {
        fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
            match &self.write_error {
                Some(err) => Err(err.clone()),
                None => self.inner.set_item(key, value),
            }
        }

        fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
            match &self.read_error {
                Some(err) => Err(err.clone()),
                None => self.inner.get_item(key),
            }
        }

        fn remove_item(&self, key: &str) -> BackendResult<()> {
            self.removals.borrow_mut().push(key.to_string());
            self.inner.remove_item(key)
        }

        fn clear(&self) -> BackendResult<()> {
            self.inner.clear()
        }

        fn key(&self, index: usize) -> BackendResult<Option<String>> {
            self.inner.key(index)
        }

        fn keys(&self) -> BackendResult<Vec<String>> {
            self.inner.keys()
        }
    }

    /// Local store that silently drops writes.
    struct BlackHole;

    impl KeyValueBackend for BlackHole {
        fn set_item(&self, _key: &str, _value: &str) -> BackendResult<()> {
            Ok(())
        }
        fn get_item(&self, _key: &str) -> BackendResult<Option<String>> {
            Ok(None)
        }
        fn remove_item(&self, _key: &str) -> BackendResult<()> {
            Ok(())
        }
        fn clear(&self) -> BackendResult<()> {
            Ok(())
        }
        fn key(&self, _index: usize) -> BackendResult<Option<String>> {
            Ok(None)
        }
        fn keys(&self) -> BackendResult<Vec<String>> {
            Ok(Vec::new())
        }
    }

    /// Cookie jar whose writes fail with a fixed error.
    struct FailingJar(BackendError);

    impl CookieBackend for FailingJar {
        fn cookie(&self) -> BackendResult<String> {
            Ok(String::new())
        }
        fn set_cookie(&self, _assignment: &str) -> BackendResult<()> {
            Err(self.0.clone())
        }
    }

    #[test]
    fn key_value_probe_succeeds_and_cleans_up() {
        let store = InMemoryKeyValue::new();
        assert!(detect_key_value_support(&store, &Config::default()).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn key_value_probe_absent_store() {
        let store = InMemoryKeyValue::absent();
        assert!(!detect_key_value_support(&store, &Config::default()).unwrap());
    }

    #[test]
    fn key_value_probe_zero_quota() {
        let store = InMemoryKeyValue::with_quota(0);
        assert!(!detect_key_value_support(&store, &Config::default()).unwrap());
    }

    #[test]
    fn key_value_probe_dropped_write() {
        assert!(!detect_key_value_support(&BlackHole, &Config::default()).unwrap());
    }

    #[test]
    fn key_value_probe_propagates_unexpected_write_error() {
        let store = FaultyKeyValue {
            write_error: Some(BackendError::host("disk on fire")),
            ..Default::default()
        };
        let err = detect_key_value_support(&store, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            StorageError::Backend(BackendError::host("disk on fire"))
        );
        assert_eq!(*store.removals.borrow(), vec!["test_key"]);
    }

    #[test]
    fn key_value_probe_propagates_read_error_and_releases() {
        let store = FaultyKeyValue {
            read_error: Some(BackendError::unavailable("gone")),
            ..Default::default()
        };
        assert!(detect_key_value_support(&store, &Config::default()).is_err());
        assert_eq!(*store.removals.borrow(), vec!["test_key"]);
        assert!(store.inner.is_empty());
    }

    #[test]
    fn key_value_probe_releases_after_rejected_write() {
        let store = FaultyKeyValue {
            write_error: Some(BackendError::QuotaExceeded {
                key: "test_key".into(),
            }),
            ..Default::default()
        };
        assert!(!detect_key_value_support(&store, &Config::default()).unwrap());
        assert_eq!(*store.removals.borrow(), vec!["test_key"]);
    }

    #[test]
    fn key_value_probe_uses_configured_key() {
        let store = FaultyKeyValue::default();
        let config = Config::new().probe_key("__probe");
        assert!(detect_key_value_support(&store, &config).unwrap());
        assert_eq!(*store.removals.borrow(), vec!["__probe"]);
    }

    #[test]
    fn key_value_probe_is_idempotent() {
        let store = InMemoryKeyValue::new();
        store.set_item("keep", "me").unwrap();
        for _ in 0..3 {
            assert!(detect_key_value_support(&store, &Config::default()).unwrap());
        }
        assert_eq!(store.entries(), vec![("keep".to_string(), "me".to_string())]);
    }

    #[test]
    fn cookie_probe_trusts_enabled_signal() {
        // A blocked jar would fail the write test; the signal wins.
        let jar = InMemoryCookieJar::blocked().with_enabled_signal(Some(true));
        assert!(detect_cookie_support(&jar, &Config::default()).unwrap());
    }

    #[test]
    fn cookie_probe_can_ignore_enabled_signal() {
        let jar = InMemoryCookieJar::blocked().with_enabled_signal(Some(true));
        let config = Config::new().trust_cookies_enabled(false);
        assert!(!detect_cookie_support(&jar, &config).unwrap());
    }

    #[test]
    fn cookie_probe_writes_and_expires() {
        let jar = InMemoryCookieJar::new();
        assert!(detect_cookie_support(&jar, &Config::default()).unwrap());
        assert!(jar.is_empty());
    }

    #[test]
    fn cookie_probe_blocked_jar() {
        let jar = InMemoryCookieJar::blocked();
        assert!(!detect_cookie_support(&jar, &Config::default()).unwrap());
        assert!(jar.is_empty());
    }

    #[test]
    fn cookie_probe_keeps_existing_cookies() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("session=abc; path=/").unwrap();
        assert!(detect_cookie_support(&jar, &Config::default()).unwrap());
        assert_eq!(jar.cookie().unwrap(), "session=abc");
    }

    #[test]
    fn cookie_probe_rejected_write() {
        let jar = FailingJar(BackendError::unavailable("no document"));
        assert!(!detect_cookie_support(&jar, &Config::default()).unwrap());
    }

    #[test]
    fn cookie_probe_propagates_unexpected_error() {
        let jar = FailingJar(BackendError::host("boom"));
        assert!(detect_cookie_support(&jar, &Config::default()).is_err());
    }
}
