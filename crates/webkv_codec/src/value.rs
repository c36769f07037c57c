//! Stored value encoding.
//!
//! A value is JSON-serialized first and the JSON text is then
//! percent-encoded. Decoding runs the two steps in reverse order.

use crate::error::CodecResult;
use crate::percent::{decode_component, encode_component};
use serde::Serialize;
use serde_json::Value;

/// Raw stored form that reads back as "no value".
///
/// This is what a JavaScript writer produces when it stores `undefined`.
pub const UNDEFINED_SENTINEL: &str = "undefined";

/// Serializes a value to JSON and percent-encodes the result.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as JSON, for example
/// a map with non-string keys.
///
/// ```
/// use webkv_codec::encode_value;
///
/// assert_eq!(encode_value(&42).unwrap(), "42");
/// assert_eq!(encode_value("a b").unwrap(), "%22a%20b%22");
/// ```
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> CodecResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(encode_component(&json))
}

/// Percent-decodes a stored value and parses the JSON it contains.
///
/// Returns `None` for the [`UNDEFINED_SENTINEL`].
///
/// # Errors
///
/// Malformed escapes and JSON parse failures are returned as errors; they
/// indicate a stored value that was not written by [`encode_value`].
pub fn decode_value(raw: &str) -> CodecResult<Option<Value>> {
    if raw == UNDEFINED_SENTINEL {
        return Ok(None);
    }
    let json = decode_component(raw)?;
    Ok(Some(serde_json::from_str(&json)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use serde_json::json;

    #[test]
    fn json_types_survive() {
        for value in [
            json!(true),
            json!(false),
            json!(null),
            json!(1),
            json!("1"),
            json!("true"),
            json!(3.5),
            json!({"a": [1, "two", 3.5]}),
        ] {
            let raw = encode_value(&value).unwrap();
            assert_eq!(decode_value(&raw).unwrap(), Some(value));
        }
    }

    #[test]
    fn string_true_is_not_boolean_true() {
        let raw = encode_value("true").unwrap();
        assert_eq!(raw, "%22true%22");
        assert_eq!(decode_value(&raw).unwrap(), Some(json!("true")));
        assert_eq!(decode_value("true").unwrap(), Some(json!(true)));
    }

    #[test]
    fn undefined_sentinel_reads_as_none() {
        assert_eq!(decode_value(UNDEFINED_SENTINEL).unwrap(), None);
        // The string "undefined" is stored quoted and is a real value.
        let raw = encode_value("undefined").unwrap();
        assert_eq!(decode_value(&raw).unwrap(), Some(json!("undefined")));
    }

    #[test]
    fn decoding_order_is_percent_then_json() {
        // A JSON string whose content looks like an escape must not be
        // decoded twice.
        let value = json!("%41");
        let raw = encode_value(&value).unwrap();
        assert_eq!(raw, "%22%2541%22");
        assert_eq!(decode_value(&raw).unwrap(), Some(value));
    }

    #[test]
    fn reserved_characters_are_not_stored_verbatim() {
        let raw = encode_value(&json!({"k": "a;b=c d"})).unwrap();
        assert!(!raw.contains(';'));
        assert!(!raw.contains('='));
        assert!(!raw.contains(' '));
    }

    #[test]
    fn corrupted_value_is_an_error() {
        assert!(matches!(decode_value("%7Bnope"), Err(CodecError::Json { .. })));
        assert!(matches!(
            decode_value("%E"),
            Err(CodecError::MalformedEscape { .. })
        ));
    }
}
