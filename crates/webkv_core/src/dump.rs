//! Bulk dump helpers.
//!
//! These read every entry of one specific backend, regardless of which
//! backend the handle would route to. Values that were not written by the
//! facade are common here, so decoding is best-effort: text that fails to
//! percent-decode is kept as it is.

use crate::error::StorageResult;
use serde_json::Value;
use std::collections::BTreeMap;
use webkv_codec::{coerce, cookie_pairs, decode_component, Coerced};
use webkv_storage::{CookieBackend, KeyValueBackend};

/// Decoded key to value mapping produced by a dump.
pub type Dump = BTreeMap<String, Coerced>;

fn decode_lossy(raw: &str) -> String {
    decode_component(raw).unwrap_or_else(|_| raw.to_string())
}

fn dump_value(raw: &str, coerce_values: bool) -> Coerced {
    let decoded = decode_lossy(raw);
    if coerce_values {
        coerce(&decoded)
    } else {
        Coerced::Value(Value::String(decoded))
    }
}

/// Dumps every cookie.
///
/// Without coercion each value is the decoded text; with coercion it is
/// passed through [`coerce`]. Nameless cookies are skipped. When two cookies
/// share a name, the first one wins.
///
/// # Errors
///
/// Returns an error if the cookie string cannot be read.
pub fn dump_cookies(backend: &dyn CookieBackend, coerce_values: bool) -> StorageResult<Dump> {
    let cookie = backend.cookie()?;
    let mut dump = Dump::new();
    for (name, raw_value) in cookie_pairs(&cookie) {
        if name.is_empty() {
            continue;
        }
        dump.entry(decode_lossy(&name))
            .or_insert_with(|| dump_value(&raw_value, coerce_values));
    }
    Ok(dump)
}

/// Dumps every local store entry.
///
/// # Errors
///
/// Returns an error if the local store cannot be read.
pub fn dump_local_store(
    backend: &dyn KeyValueBackend,
    coerce_values: bool,
) -> StorageResult<Dump> {
    let mut dump = Dump::new();
    for raw_key in backend.keys()? {
        if let Some(raw_value) = backend.get_item(&raw_key)? {
            dump.insert(decode_lossy(&raw_key), dump_value(&raw_value, coerce_values));
        }
    }
    Ok(dump)
}
