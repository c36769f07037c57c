//! Encoding test vectors.
//!
//! The expected outputs are what a browser's `encodeURIComponent` and
//! `JSON.stringify` produce, so stored entries stay readable by other
//! implementations on the same origin.

use serde::{Deserialize, Serialize};

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input text, or JSON text for value vectors.
    pub input: String,
    /// Expected stored form.
    pub expected: String,
}

fn vector(id: &str, description: &str, input: &str, expected: &str) -> TestVector {
    TestVector {
        id: id.into(),
        description: description.into(),
        input: input.into(),
        expected: expected.into(),
    }
}

/// Component (key) encoding vectors.
pub fn component_vectors() -> Vec<TestVector> {
    vec![
        vector("component_empty", "Empty string", "", ""),
        vector(
            "component_unreserved",
            "Unreserved characters pass through",
            "AZaz09-_.!~*'()",
            "AZaz09-_.!~*'()",
        ),
        vector("component_space", "Space", " ", "%20"),
        vector("component_cookie_delims", "Cookie delimiters", ";=,", "%3B%3D%2C"),
        vector("component_ampersand_caret", "Ampersand and caret", "&^", "%26%5E"),
        vector("component_percent", "Literal percent", "%41", "%2541"),
        vector("component_plus_slash", "Plus and slash", "+/", "%2B%2F"),
        vector("component_quote", "Double quote", "\"", "%22"),
        vector(
            "component_two_byte",
            "Two-byte UTF-8",
            "\u{e9}",
            "%C3%A9",
        ),
        vector(
            "component_three_byte",
            "Three-byte UTF-8",
            "\u{2672}",
            "%E2%99%B2",
        ),
        vector(
            "component_four_byte",
            "Four-byte UTF-8",
            "\u{1f600}",
            "%F0%9F%98%80",
        ),
    ]
}

/// Value encoding vectors. Inputs are JSON text.
pub fn value_vectors() -> Vec<TestVector> {
    vec![
        vector("value_integer", "Integer", "42", "42"),
        vector("value_negative_float", "Negative float", "-3.5", "-3.5"),
        vector("value_true", "Boolean", "true", "true"),
        vector("value_null", "Null", "null", "null"),
        vector("value_string", "String is quoted", "\"abc\"", "%22abc%22"),
        vector(
            "value_string_true",
            "String that looks like a boolean",
            "\"true\"",
            "%22true%22",
        ),
        vector(
            "value_empty_string",
            "Empty string",
            "\"\"",
            "%22%22",
        ),
        vector(
            "value_array",
            "Array",
            "[1,\"two\",3.5]",
            "%5B1%2C%22two%22%2C3.5%5D",
        ),
        vector(
            "value_object",
            "Object",
            "{\"a\":1}",
            "%7B%22a%22%3A1%7D",
        ),
        vector(
            "value_percent_string",
            "String holding an escape sequence",
            "\"%41\"",
            "%22%2541%22",
        ),
    ]
}

/// Returns all vectors as JSON for sharing with other implementations.
pub fn all_vectors_json() -> String {
    #[derive(Serialize)]
    struct AllVectors {
        component: Vec<TestVector>,
        value: Vec<TestVector>,
    }

    let all = AllVectors {
        component: component_vectors(),
        value: value_vectors(),
    };

    serde_json::to_string_pretty(&all).expect("Failed to serialize vectors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use webkv_codec::{decode_component, decode_value, encode_component, encode_value};

    #[test]
    fn test_component_vectors() {
        for vector in component_vectors() {
            assert_eq!(
                encode_component(&vector.input),
                vector.expected,
                "Vector {} failed: {}",
                vector.id,
                vector.description
            );
            assert_eq!(
                decode_component(&vector.expected).unwrap(),
                vector.input,
                "Vector {} failed to decode",
                vector.id
            );
        }
    }

    #[test]
    fn test_value_vectors() {
        for vector in value_vectors() {
            let value: Value = serde_json::from_str(&vector.input).unwrap();
            assert_eq!(
                encode_value(&value).unwrap(),
                vector.expected,
                "Vector {} failed: {}",
                vector.id,
                vector.description
            );
            assert_eq!(
                decode_value(&vector.expected).unwrap(),
                Some(value),
                "Vector {} failed to decode",
                vector.id
            );
        }
    }

    #[test]
    fn test_all_vectors_json() {
        let json = all_vectors_json();
        assert!(json.contains("component_space"));
        assert!(json.contains("value_object"));
    }
}
