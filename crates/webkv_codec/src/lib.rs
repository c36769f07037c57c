//! # webkv Codec
//!
//! Encoding rules shared by every webkv storage backend.
//!
//! ## Stored Form
//!
//! - Keys are percent-encoded with `encodeURIComponent` semantics
//! - Values are serialized to JSON, then percent-encoded
//! - Decoding reverses the order: percent-decode, then parse JSON
//! - The raw value `undefined` means "no value"
//!
//! Percent-encoding removes `;`, `=` and whitespace from both halves of an
//! entry, so the same stored form is valid as a local-store slot and inside a
//! cookie string.
//!
//! ## Usage
//!
//! ```
//! use serde_json::json;
//! use webkv_codec::{decode_value, encode_component, encode_value};
//!
//! let key = encode_component("obj");
//! let raw = encode_value(&json!({"a": [1, "two", 3.5]})).unwrap();
//! assert_eq!(key, "obj");
//! assert_eq!(decode_value(&raw).unwrap(), Some(json!({"a": [1, "two", 3.5]})));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod coerce;
mod cookie;
mod error;
mod key;
mod percent;
mod value;

pub use coerce::{coerce, Coerced};
pub use cookie::{
    cookie_names, cookie_pairs, find_value, format_http_date, parse_http_date, CookieAssignment,
    HTTP_DATE_FORMAT,
};
pub use error::{CodecError, CodecResult};
pub use key::StorageKey;
pub use percent::{decode_component, encode_component};
pub use value::{decode_value, encode_value, UNDEFINED_SENTINEL};
