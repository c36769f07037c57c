//! Cookie string handling.
//!
//! The host exposes cookies as one string of `name=value` pairs joined by
//! `"; "`, and accepts writes as single assignments of the form
//! `name=value; expires=<HTTP-date>; path=/`.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

/// HTTP-date layout used in `expires=` attributes (RFC 7231 IMF-fixdate).
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Formats a timestamp as an HTTP-date.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use webkv_codec::format_http_date;
///
/// let at = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
/// assert_eq!(format_http_date(at), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format_http_date(at: DateTime<Utc>) -> String {
    at.format(HTTP_DATE_FORMAT).to_string()
}

/// Parses an HTTP-date, returning `None` when it is not well formed.
pub fn parse_http_date(text: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Finds the value of the cookie called `name`.
///
/// A segment matches when, after the `;` separator and at most one space,
/// it reads exactly `name=`. The value runs to the next `;`.
pub fn find_value<'a>(cookie: &'a str, name: &str) -> Option<&'a str> {
    cookie.split(';').find_map(|segment| {
        let segment = segment.strip_prefix(' ').unwrap_or(segment);
        match segment.split_once('=') {
            Some((segment_name, value)) if segment_name == name => Some(value),
            _ => None,
        }
    })
}

/// Lists the cookie names in textual order.
///
/// Names are trimmed but not percent-decoded. Empty segments, such as the
/// one produced by an empty cookie string, are skipped.
pub fn cookie_names(cookie: &str) -> Vec<String> {
    cookie
        .split(';')
        .filter_map(|segment| {
            let name = segment.split('=').next().unwrap_or_default().trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Splits a cookie string into `(name, value)` pairs in textual order.
///
/// Names are trimmed; a segment without `=` yields an empty name.
pub fn cookie_pairs(cookie: &str) -> Vec<(String, String)> {
    cookie
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => (name.trim().to_string(), value.to_string()),
            None => (String::new(), segment.trim().to_string()),
        })
        .collect()
}

/// A single cookie write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAssignment {
    /// Cookie name, as written.
    pub name: String,
    /// Cookie value, as written.
    pub value: String,
    /// Absolute expiry; `None` makes a session cookie.
    pub expires: Option<DateTime<Utc>>,
    /// Relative expiry in seconds. Takes precedence over `expires`.
    pub max_age: Option<i64>,
    /// `path=` attribute.
    pub path: Option<String>,
}

impl CookieAssignment {
    /// Creates a session cookie assignment.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            max_age: None,
            path: None,
        }
    }

    /// Sets the absolute expiry.
    #[must_use]
    pub fn expires(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(at);
        self
    }

    /// Sets the `path=` attribute.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Parses an assignment the way a browser cookie jar does.
    ///
    /// Unknown attributes and unparsable dates are ignored. A first segment
    /// without `=` is a nameless cookie whose value is the whole segment.
    pub fn parse(assignment: &str) -> Self {
        let mut parts = assignment.split(';');
        let pair = parts.next().unwrap_or_default();
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => ("", pair.trim()),
        };

        let mut parsed = Self::new(name, value);
        for attribute in parts {
            let (attr, attr_value) = match attribute.split_once('=') {
                Some((attr, attr_value)) => (attr.trim(), attr_value.trim()),
                None => (attribute.trim(), ""),
            };
            if attr.eq_ignore_ascii_case("expires") {
                if let Some(at) = parse_http_date(attr_value) {
                    parsed.expires = Some(at);
                }
            } else if attr.eq_ignore_ascii_case("max-age") {
                if let Ok(seconds) = attr_value.parse::<i64>() {
                    parsed.max_age = Some(seconds);
                }
            } else if attr.eq_ignore_ascii_case("path") {
                parsed.path = Some(attr_value.to_string());
            }
        }
        parsed
    }

    /// Resolves the effective expiry relative to `now`.
    ///
    /// `max-age` wins over `expires`; a non-positive `max-age` expires the
    /// cookie immediately.
    pub fn expiry(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.max_age {
            Some(seconds) if seconds <= 0 => Some(DateTime::<Utc>::MIN_UTC),
            Some(seconds) => Some(
                chrono::Duration::try_seconds(seconds)
                    .and_then(|delta| now.checked_add_signed(delta))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ),
            None => self.expires,
        }
    }
}

impl fmt::Display for CookieAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(at) = self.expires {
            write!(f, "; expires={}", format_http_date(at))?;
        }
        if let Some(seconds) = self.max_age {
            write!(f, "; max-age={seconds}")?;
        }
        if let Some(path) = &self.path {
            write!(f, "; path={path}")?;
        }
        Ok(())
    }
}
