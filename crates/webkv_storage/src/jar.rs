//! In-memory cookie jar.

use crate::backend::CookieBackend;
use crate::error::BackendResult;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use webkv_codec::CookieAssignment;

/// An in-memory cookie jar that behaves like `document.cookie`.
///
/// Assignments are parsed the way a browser parses them. An expiry in the
/// past deletes the cookie, and expired cookies disappear from the cookie
/// string. Cookies are listed in creation order; updating a cookie keeps its
/// position. Clones share the same jar.
///
/// # Example
///
/// ```rust
/// use webkv_storage::{CookieBackend, InMemoryCookieJar};
///
/// let jar = InMemoryCookieJar::new();
/// jar.set_cookie("a=1; path=/").unwrap();
/// jar.set_cookie("b=2; path=/").unwrap();
/// assert_eq!(jar.cookie().unwrap(), "a=1; b=2");
///
/// jar.set_cookie("a=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/").unwrap();
/// assert_eq!(jar.cookie().unwrap(), "b=2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCookieJar {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    cookies: Vec<StoredCookie>,
    /// Writes are accepted and silently dropped.
    blocked: bool,
    enabled_signal: Option<bool>,
}

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    path: Option<String>,
    expires: Option<DateTime<Utc>>,
}

impl StoredCookie {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(true, |at| at > now)
    }

    fn render(&self) -> String {
        if self.name.is_empty() {
            self.value.clone()
        } else {
            format!("{}={}", self.name, self.value)
        }
    }
}

impl InMemoryCookieJar {
    /// Creates an empty jar that accepts cookies and has no enabled signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a jar whose host has cookies switched off.
    ///
    /// Assignments succeed but are ignored, and the enabled signal reads
    /// `false`.
    #[must_use]
    pub fn blocked() -> Self {
        let jar = Self::new();
        {
            let mut state = jar.state.write();
            state.blocked = true;
            state.enabled_signal = Some(false);
        }
        jar
    }

    /// Sets the "cookies enabled" signal reported to callers.
    #[must_use]
    pub fn with_enabled_signal(self, signal: Option<bool>) -> Self {
        self.state.write().enabled_signal = signal;
        self
    }

    /// Switches cookie blocking on or off.
    pub fn set_blocked(&self, blocked: bool) {
        self.state.write().blocked = blocked;
    }

    /// Returns the names of all live cookies in jar order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let now = Utc::now();
        self.state
            .read()
            .cookies
            .iter()
            .filter(|c| c.is_live(now))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Returns the number of live cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names().len()
    }

    /// Returns `true` if no live cookie remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the expiry of a live cookie, `None` for session cookies.
    #[must_use]
    pub fn expiry_of(&self, name: &str) -> Option<Option<DateTime<Utc>>> {
        let now = Utc::now();
        self.state
            .read()
            .cookies
            .iter()
            .find(|c| c.name == name && c.is_live(now))
            .map(|c| c.expires)
    }
}

impl CookieBackend for InMemoryCookieJar {
    fn cookie(&self) -> BackendResult<String> {
        let now = Utc::now();
        let mut state = self.state.write();
        state.cookies.retain(|c| c.is_live(now));
        Ok(state
            .cookies
            .iter()
            .map(StoredCookie::render)
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn set_cookie(&self, assignment: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        if state.blocked {
            return Ok(());
        }

        let now = Utc::now();
        let parsed = CookieAssignment::parse(assignment);
        let expires = parsed.expiry(now);
        let position = state
            .cookies
            .iter()
            .position(|c| c.name == parsed.name && c.path == parsed.path);

        if expires.is_some_and(|at| at <= now) {
            if let Some(index) = position {
                state.cookies.remove(index);
            }
            return Ok(());
        }

        let cookie = StoredCookie {
            name: parsed.name,
            value: parsed.value,
            path: parsed.path,
            expires,
        };
        match position {
            Some(index) => state.cookies[index] = cookie,
            None => state.cookies.push(cookie),
        }
        Ok(())
    }

    fn cookies_enabled(&self) -> Option<bool> {
        self.state.read().enabled_signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webkv_codec::format_http_date;

    fn in_days(days: i64) -> String {
        format_http_date(Utc::now() + chrono::Duration::days(days))
    }

    #[test]
    fn jar_new_is_empty() {
        let jar = InMemoryCookieJar::new();
        assert_eq!(jar.cookie().unwrap(), "");
        assert!(jar.is_empty());
        assert_eq!(jar.cookies_enabled(), None);
    }

    #[test]
    fn jar_update_keeps_position() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("a=1; path=/").unwrap();
        jar.set_cookie("b=2; path=/").unwrap();
        jar.set_cookie("a=3; path=/").unwrap();
        assert_eq!(jar.cookie().unwrap(), "a=3; b=2");
    }

    #[test]
    fn jar_future_expiry_is_kept() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie(&format!("k=v; expires={}; path=/", in_days(1)))
            .unwrap();
        assert_eq!(jar.cookie().unwrap(), "k=v");
        assert!(jar.expiry_of("k").unwrap().is_some());
    }

    #[test]
    fn jar_past_expiry_deletes() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("k=v; path=/").unwrap();
        jar.set_cookie(&format!("k=; expires={}; path=/", in_days(-7)))
            .unwrap();
        assert_eq!(jar.cookie().unwrap(), "");
        assert_eq!(jar.expiry_of("k"), None);
    }

    #[test]
    fn jar_past_expiry_for_unknown_cookie_is_noop() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie(&format!("ghost=; expires={}; path=/", in_days(-7)))
            .unwrap();
        assert!(jar.is_empty());
    }

    #[test]
    fn jar_session_cookie_has_no_expiry() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("s=1; path=/").unwrap();
        assert_eq!(jar.expiry_of("s"), Some(None));
    }

    #[test]
    fn jar_paths_are_distinct_cookies() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("k=root; path=/").unwrap();
        jar.set_cookie("k=docs; path=/docs").unwrap();
        assert_eq!(jar.cookie().unwrap(), "k=root; k=docs");
    }

    #[test]
    fn jar_nameless_cookie_renders_value() {
        let jar = InMemoryCookieJar::new();
        jar.set_cookie("testcookie").unwrap();
        assert_eq!(jar.cookie().unwrap(), "testcookie");
    }

    #[test]
    fn jar_blocked_ignores_writes() {
        let jar = InMemoryCookieJar::blocked();
        jar.set_cookie("k=v; path=/").unwrap();
        assert_eq!(jar.cookie().unwrap(), "");
        assert_eq!(jar.cookies_enabled(), Some(false));

        jar.set_blocked(false);
        jar.set_cookie("k=v; path=/").unwrap();
        assert_eq!(jar.cookie().unwrap(), "k=v");
    }

    #[test]
    fn jar_enabled_signal() {
        let jar = InMemoryCookieJar::new().with_enabled_signal(Some(true));
        assert_eq!(jar.cookies_enabled(), Some(true));
    }

    #[test]
    fn jar_clones_share_cookies() {
        let jar = InMemoryCookieJar::new();
        let other = jar.clone();
        jar.set_cookie("k=v").unwrap();
        assert_eq!(other.cookie().unwrap(), "k=v");
    }
}
