//! Web storage backend implementations.
//!
//! This module provides the two browser facilities the facade can use:
//! - `localStorage` through [`WebLocalStorage`]
//! - `document.cookie` through [`DocumentCookies`]
//!
//! Both resolve their host objects once, on construction. A page without a
//! window or document gets backends whose every call fails with
//! [`webkv_storage::BackendError::Unavailable`].

mod cookies;
mod local;

pub use cookies::DocumentCookies;
pub use local::WebLocalStorage;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;
use webkv_storage::BackendError;

/// Maps a thrown JS value to a backend error.
///
/// `SecurityError` is what browsers throw when storage is disabled by
/// policy, so it counts as "feature absent".
fn map_js_error(err: JsValue, key: Option<&str>) -> BackendError {
    match err.dyn_ref::<DomException>() {
        Some(exception) => {
            let name = exception.name();
            match name.as_str() {
                "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED" => {
                    BackendError::QuotaExceeded {
                        key: key.unwrap_or_default().to_string(),
                    }
                }
                "SecurityError" => BackendError::unavailable(exception.message()),
                _ => BackendError::host(format!("{}: {}", name, exception.message())),
            }
        }
        None => BackendError::host(err.as_string().unwrap_or_else(|| format!("{:?}", err))),
    }
}
