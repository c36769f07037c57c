//! Best-effort typed reconstruction of raw strings.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// The result of coercing a raw string.
///
/// JSON has no representation for `NaN` or `undefined`, so they get their
/// own variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// A JSON value, or the original string when it was not valid JSON.
    Value(Value),
    /// The raw string was exactly `NaN`.
    NaN,
    /// The raw string was exactly `undefined`.
    Undefined,
}

impl Coerced {
    /// Returns the JSON value, if this is one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::NaN | Self::Undefined => None,
        }
    }

    /// Converts into the JSON value, if this is one.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::NaN | Self::Undefined => None,
        }
    }
}

impl From<Value> for Coerced {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Coerced {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::NaN => serializer.serialize_f64(f64::NAN),
            Self::Undefined => serializer.serialize_unit(),
        }
    }
}

/// Parses `raw` as JSON, falling back to the literal string.
///
/// `"undefined"` and `"NaN"` are not JSON but map to [`Coerced::Undefined`]
/// and [`Coerced::NaN`].
///
/// ```
/// use serde_json::json;
/// use webkv_codec::{coerce, Coerced};
///
/// assert_eq!(coerce("true"), Coerced::Value(json!(true)));
/// assert_eq!(coerce("spam"), Coerced::Value(json!("spam")));
/// assert_eq!(coerce("NaN"), Coerced::NaN);
/// ```
pub fn coerce(raw: &str) -> Coerced {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Coerced::Value(value),
        Err(_) => match raw {
            "undefined" => Coerced::Undefined,
            "NaN" => Coerced::NaN,
            _ => Coerced::Value(Value::String(raw.to_string())),
        },
    }
}
