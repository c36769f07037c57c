//! Storage keys.

use std::fmt;

/// A key as callers address it: a string or a number.
///
/// Numbers are rendered the way JavaScript converts them to strings, so
/// `2.0` and `2` name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    /// Returns the key text before encoding.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StorageKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for StorageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for StorageKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StorageKey {
                fn from(key: $ty) -> Self {
                    Self(key.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for StorageKey {
    fn from(key: f64) -> Self {
        let text = if key.is_nan() {
            "NaN".to_string()
        } else if key.is_infinite() {
            if key > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
        } else if key == 0.0 {
            // -0 renders as "0"
            "0".to_string()
        } else {
            format_finite(key)
        };
        Self(text)
    }
}

/// Renders a finite, non-zero number the way `Number.prototype.toString`
/// does: plain notation for decimal exponents in `-7..21`, otherwise
/// `d[.ddd]e±n`.
fn format_finite(key: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-7".
    let scientific = format!("{:e}", key.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return key.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return key.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if key < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

impl From<f32> for StorageKey {
    fn from(key: f32) -> Self {
        Self::from(f64::from(key))
    }
}
