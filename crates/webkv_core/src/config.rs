//! Facade configuration.

use std::time::Duration;

/// Configuration for a [`crate::BrowserStorage`] handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Key written and removed by the local store probe.
    pub probe_key: String,

    /// Cookie name written and expired by the cookie probe.
    pub probe_cookie: String,

    /// Lifetime of the probe cookie.
    pub probe_cookie_ttl: Duration,

    /// `path=` attribute of every cookie the facade writes.
    pub cookie_path: String,

    /// Lifetime in days used to expire a cookie on removal.
    ///
    /// Values that are not negative would keep the cookie alive, so removal
    /// falls back to `-1`. See [`Config::removal_lifetime`].
    pub removal_days: i64,

    /// Whether a host "cookies enabled" signal of `true` skips the cookie
    /// probe.
    pub trust_cookies_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_key: "test_key".to_string(),
            probe_cookie: "testcookie".to_string(),
            probe_cookie_ttl: Duration::from_secs(60),
            cookie_path: "/".to_string(),
            removal_days: -7,
            trust_cookies_enabled: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the local store probe key.
    #[must_use]
    pub fn probe_key(mut self, key: impl Into<String>) -> Self {
        self.probe_key = key.into();
        self
    }

    /// Sets the probe cookie name.
    #[must_use]
    pub fn probe_cookie(mut self, name: impl Into<String>) -> Self {
        self.probe_cookie = name.into();
        self
    }

    /// Sets the probe cookie lifetime.
    #[must_use]
    pub const fn probe_cookie_ttl(mut self, ttl: Duration) -> Self {
        self.probe_cookie_ttl = ttl;
        self
    }

    /// Sets the cookie `path=` attribute.
    #[must_use]
    pub fn cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    /// Sets the removal lifetime in days.
    #[must_use]
    pub const fn removal_days(mut self, days: i64) -> Self {
        self.removal_days = days;
        self
    }

    /// Lifetime in days actually written when expiring a cookie.
    ///
    /// Always negative.
    #[must_use]
    pub const fn removal_lifetime(&self) -> i64 {
        if self.removal_days < 0 {
            self.removal_days
        } else {
            -1
        }
    }

    /// Sets whether the host "cookies enabled" signal is trusted.
    #[must_use]
    pub const fn trust_cookies_enabled(mut self, value: bool) -> Self {
        self.trust_cookies_enabled = value;
        self
    }
}
