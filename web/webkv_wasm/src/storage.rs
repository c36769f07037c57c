//! Storage WASM bindings.
//!
//! This module provides the JavaScript-facing `BrowserStorage` class.

use crate::backend::{DocumentCookies, WebLocalStorage};
use crate::error::{WasmError, WasmResult};
use js_sys::{Array, Function, Object, Reflect, Symbol};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use webkv_codec::{coerce, Coerced, StorageKey};
use webkv_core::{ActiveBackend, BrowserStorage, Dump, Entry};

/// Key/value storage over `localStorage`, falling back to cookies.
///
/// ## Example
///
/// ```javascript
/// const storage = new BrowserStorage();
/// if (storage.storageAvailable) {
///     storage.set("obj", { a: [1, "two", 3.5] }, 7);
///     console.log(storage.get("obj"));
///
///     for (const { key, value } of storage.iterator()) {
///         console.log(key, value);
///     }
/// }
/// ```
#[wasm_bindgen(js_name = BrowserStorage)]
pub struct WebStorage {
    inner: Rc<RefCell<BrowserStorage>>,
}

#[wasm_bindgen(js_class = BrowserStorage)]
impl WebStorage {
    /// Creates a handle and probes the page's storage facilities.
    ///
    /// A page without any usable storage still gets a handle; check
    /// `storageAvailable` before reading.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebStorage, JsValue> {
        let storage = BrowserStorage::new(WebLocalStorage::new(), DocumentCookies::new())
            .map_err(WasmError::from)?;
        Ok(WebStorage {
            inner: Rc::new(RefCell::new(storage)),
        })
    }

    /// Re-probes both facilities and updates the cached flags.
    #[wasm_bindgen]
    pub fn refresh(&self) -> Result<(), JsValue> {
        self.inner.borrow_mut().refresh().map_err(WasmError::from)?;
        Ok(())
    }

    /// Alias for `refresh`.
    #[wasm_bindgen(js_name = constructorRefresh)]
    pub fn constructor_refresh(&self) -> Result<(), JsValue> {
        self.refresh()
    }

    /// Whether `localStorage` was usable at the last refresh.
    #[wasm_bindgen(getter = localStoreSupported)]
    pub fn local_store_supported(&self) -> bool {
        self.inner.borrow().local_store_supported()
    }

    /// Whether cookies were usable at the last refresh.
    #[wasm_bindgen(getter = cookieStoreSupported)]
    pub fn cookie_store_supported(&self) -> bool {
        self.inner.borrow().cookie_store_supported()
    }

    /// Whether any storage was usable at the last refresh.
    #[wasm_bindgen(getter = storageAvailable)]
    pub fn storage_available(&self) -> bool {
        self.inner.borrow().storage_available()
    }

    /// `"localStorage"`, `"cookies"`, or `undefined`.
    #[wasm_bindgen(getter = activeBackend)]
    pub fn active_backend(&self) -> Option<String> {
        self.inner
            .borrow()
            .active_backend()
            .map(|backend| match backend {
                ActiveBackend::LocalStore => "localStorage".to_string(),
                ActiveBackend::Cookies => "cookies".to_string(),
            })
    }

    /// Overrides the cached flags without probing.
    #[wasm_bindgen(js_name = forceCapabilities)]
    pub fn force_capabilities(&self, local_store: bool, cookies: bool) {
        self.inner
            .borrow_mut()
            .force_capabilities(local_store, cookies);
    }

    /// Probes `localStorage` without touching the cached flags.
    #[wasm_bindgen(js_name = detectKeyValueSupport)]
    pub fn detect_key_value_support(&self) -> Result<bool, JsValue> {
        Ok(self
            .inner
            .borrow()
            .detect_key_value_support()
            .map_err(WasmError::from)?)
    }

    /// Probes cookies without touching the cached flags.
    #[wasm_bindgen(js_name = detectCookieSupport)]
    pub fn detect_cookie_support(&self) -> Result<bool, JsValue> {
        Ok(self
            .inner
            .borrow()
            .detect_cookie_support()
            .map_err(WasmError::from)?)
    }

    /// Reads a value. Returns `undefined` for a missing key.
    ///
    /// Throws a `ReferenceError` if no storage is available.
    #[wasm_bindgen]
    pub fn get(&self, key: JsValue) -> Result<JsValue, JsValue> {
        let key = key_from_js(&key)?;
        let value = self.inner.borrow().get(key).map_err(WasmError::from)?;
        Ok(match value {
            Some(value) => json_to_js(&value)?,
            None => JsValue::UNDEFINED,
        })
    }

    /// Alias for `get`.
    #[wasm_bindgen(js_name = getItem)]
    pub fn get_item(&self, key: JsValue) -> Result<JsValue, JsValue> {
        self.get(key)
    }

    /// Stores a JSON-serializable value.
    ///
    /// `daysToLive` only applies to cookies; omitted or `0` makes a session
    /// cookie. Returns `false` if no storage is available.
    #[wasm_bindgen]
    pub fn set(
        &self,
        key: JsValue,
        value: JsValue,
        days_to_live: Option<f64>,
    ) -> Result<bool, JsValue> {
        let key = key_from_js(&key)?;
        let value: Value = serde_wasm_bindgen::from_value(value).map_err(WasmError::from)?;
        let days_to_live = days_to_live.filter(|days| days.is_finite()).map(|days| days.trunc() as i64);
        Ok(self
            .inner
            .borrow()
            .set(key, &value, days_to_live)
            .map_err(WasmError::from)?)
    }

    /// Alias for `set`.
    #[wasm_bindgen(js_name = setItem)]
    pub fn set_item(
        &self,
        key: JsValue,
        value: JsValue,
        days_to_live: Option<f64>,
    ) -> Result<bool, JsValue> {
        self.set(key, value, days_to_live)
    }

    /// Removes a key. Returns `false` if no storage is available.
    #[wasm_bindgen]
    pub fn remove(&self, key: JsValue) -> Result<bool, JsValue> {
        let key = key_from_js(&key)?;
        Ok(self.inner.borrow().remove(key).map_err(WasmError::from)?)
    }

    /// Alias for `remove`.
    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&self, key: JsValue) -> Result<bool, JsValue> {
        self.remove(key)
    }

    /// Removes every entry. Returns `false` if no storage is available.
    #[wasm_bindgen]
    pub fn clear(&self) -> Result<bool, JsValue> {
        Ok(self.inner.borrow().clear().map_err(WasmError::from)?)
    }

    /// Lists the stored keys.
    #[wasm_bindgen]
    pub fn keys(&self) -> Result<Array, JsValue> {
        let keys = self.inner.borrow().keys().map_err(WasmError::from)?;
        Ok(keys.into_iter().map(JsValue::from).collect())
    }

    /// Returns the key at `index`, or `undefined`.
    #[wasm_bindgen]
    pub fn key(&self, index: u32) -> Result<Option<String>, JsValue> {
        Ok(self
            .inner
            .borrow()
            .key(index as usize)
            .map_err(WasmError::from)?)
    }

    /// Starts a fresh pass over all entries.
    ///
    /// The returned `StorageIterator` is also iterable, so it works with
    /// `for...of`, spread and `Array.from`.
    #[wasm_bindgen]
    pub fn iterator(&self) -> Result<JsValue, JsValue> {
        let keys = self.inner.borrow().keys().map_err(WasmError::from)?;
        let iterator = JsValue::from(StorageIterator {
            storage: Rc::clone(&self.inner),
            keys: keys.into_iter(),
        });
        // `[Symbol.iterator]()` returns the iterator itself.
        let itself = Function::new_no_args("return this;");
        Reflect::set(&iterator, &Symbol::iterator(), &itself)?;
        Ok(iterator)
    }

    /// Returns every cookie as a plain object, decoding keys and values.
    ///
    /// With `coerce`, values are parsed as JSON where possible.
    #[wasm_bindgen(js_name = dumpCookies)]
    pub fn dump_cookies(&self, coerce: Option<bool>) -> Result<Object, JsValue> {
        let dump = self
            .inner
            .borrow()
            .dump_cookies(coerce.unwrap_or(false))
            .map_err(WasmError::from)?;
        dump_to_js(&dump)
    }

    /// Alias for `dumpCookies`.
    #[wasm_bindgen(js_name = getObjectifiedCookies)]
    pub fn get_objectified_cookies(&self, coerce: Option<bool>) -> Result<Object, JsValue> {
        self.dump_cookies(coerce)
    }

    /// Returns every `localStorage` entry as a plain object.
    #[wasm_bindgen(js_name = dumpLocalStore)]
    pub fn dump_local_store(&self, coerce: Option<bool>) -> Result<Object, JsValue> {
        let dump = self
            .inner
            .borrow()
            .dump_local_store(coerce.unwrap_or(false))
            .map_err(WasmError::from)?;
        dump_to_js(&dump)
    }

    /// Alias for `dumpLocalStore`.
    #[wasm_bindgen(js_name = getObjectifiedLocalStorage)]
    pub fn get_objectified_local_storage(&self, coerce: Option<bool>) -> Result<Object, JsValue> {
        self.dump_local_store(coerce)
    }

    /// Parses text as JSON, falling back to the text itself.
    ///
    /// `"undefined"` becomes `undefined` and `"NaN"` becomes `NaN`.
    #[wasm_bindgen(js_name = coerce)]
    pub fn coerce_value(value: &str) -> Result<JsValue, JsValue> {
        Ok(coerced_to_js(&coerce(value))?)
    }
}

/// A single pass over the stored entries.
///
/// `next()` follows the JS iterator protocol and returns
/// `{ value: { key, value }, done }`.
#[wasm_bindgen]
pub struct StorageIterator {
    storage: Rc<RefCell<BrowserStorage>>,
    keys: std::vec::IntoIter<String>,
}

#[wasm_bindgen]
impl StorageIterator {
    /// Advances the iterator.
    #[allow(clippy::should_implement_trait)]
    #[wasm_bindgen]
    pub fn next(&mut self) -> Result<Object, JsValue> {
        let result = Object::new();
        match self.keys.next() {
            Some(stored_key) => {
                let entry = self
                    .storage
                    .borrow()
                    .entry(&stored_key)
                    .map_err(WasmError::from)?;
                Reflect::set(&result, &"value".into(), &entry_to_js(&entry)?)?;
                Reflect::set(&result, &"done".into(), &JsValue::FALSE)?;
            }
            None => {
                Reflect::set(&result, &"value".into(), &JsValue::UNDEFINED)?;
                Reflect::set(&result, &"done".into(), &JsValue::TRUE)?;
            }
        }
        Ok(result)
    }
}

fn key_from_js(key: &JsValue) -> WasmResult<StorageKey> {
    if let Some(text) = key.as_string() {
        Ok(StorageKey::from(text))
    } else if let Some(number) = key.as_f64() {
        Ok(StorageKey::from(number))
    } else {
        Err(WasmError::InvalidInput(
            "key must be a string or a number".to_string(),
        ))
    }
}

fn json_to_js(value: &Value) -> WasmResult<JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(value.serialize(&serializer)?)
}

fn coerced_to_js(value: &Coerced) -> WasmResult<JsValue> {
    match value {
        Coerced::Value(value) => json_to_js(value),
        Coerced::NaN => Ok(JsValue::from_f64(f64::NAN)),
        Coerced::Undefined => Ok(JsValue::UNDEFINED),
    }
}

fn entry_to_js(entry: &Entry) -> WasmResult<JsValue> {
    let object = Object::new();
    let value = match &entry.value {
        Some(value) => json_to_js(value)?,
        None => JsValue::UNDEFINED,
    };
    Reflect::set(&object, &"key".into(), &JsValue::from_str(&entry.key))?;
    Reflect::set(&object, &"value".into(), &value)?;
    Ok(object.into())
}

fn dump_to_js(dump: &Dump) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in dump {
        Reflect::set(&object, &JsValue::from_str(key), &coerced_to_js(value)?)?;
    }
    Ok(object)
}
