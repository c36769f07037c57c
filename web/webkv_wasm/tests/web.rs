//! Browser tests for the WASM bindings.
//!
//! Run with `wasm-pack test --headless --firefox` (or `--chrome`).

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use webkv_storage::{CookieBackend, KeyValueBackend};
use webkv_wasm::{DocumentCookies, WebLocalStorage, WebStorage};

wasm_bindgen_test_configure!(run_in_browser);

fn get(object: &JsValue, field: &str) -> JsValue {
    Reflect::get(object, &JsValue::from_str(field)).unwrap()
}

fn fresh() -> WebStorage {
    let storage = WebStorage::new().unwrap();
    storage.clear().unwrap();
    storage
}

#[wasm_bindgen_test]
fn local_storage_backend_round_trip() {
    let local = WebLocalStorage::new();
    assert!(local.is_present());
    local.set_item("webkv-test", "1").unwrap();
    assert_eq!(local.get_item("webkv-test").unwrap().as_deref(), Some("1"));
    assert!(local.keys().unwrap().contains(&"webkv-test".to_string()));
    local.remove_item("webkv-test").unwrap();
    assert_eq!(local.get_item("webkv-test").unwrap(), None);
}

#[wasm_bindgen_test]
fn document_cookie_backend_round_trip() {
    let cookies = DocumentCookies::new();
    cookies.set_cookie("webkv_test=1; path=/").unwrap();
    assert!(cookies.cookie().unwrap().contains("webkv_test=1"));
    cookies
        .set_cookie("webkv_test=; expires=Thu, 01 Jan 1970 00:00:00 GMT; path=/")
        .unwrap();
    assert!(!cookies.cookie().unwrap().contains("webkv_test="));
}

#[wasm_bindgen_test]
fn prefers_local_storage() {
    let storage = fresh();
    assert!(storage.storage_available());
    assert!(storage.local_store_supported());
    assert_eq!(storage.active_backend().as_deref(), Some("localStorage"));
}

#[wasm_bindgen_test]
fn values_keep_their_js_type() {
    let storage = fresh();
    assert!(storage
        .set("count".into(), JsValue::from_f64(42.0), Some(1.0))
        .unwrap());
    assert_eq!(storage.get("count".into()).unwrap().as_f64(), Some(42.0));

    assert!(storage.set("flag".into(), JsValue::FALSE, Some(1.0)).unwrap());
    assert_eq!(storage.get("flag".into()).unwrap().as_bool(), Some(false));

    assert!(storage.set_item("text".into(), "true".into(), None).unwrap());
    assert_eq!(
        storage.get_item("text".into()).unwrap().as_string().as_deref(),
        Some("true")
    );

    assert!(storage.remove_item("count".into()).unwrap());
    assert!(storage.get("count".into()).unwrap().is_undefined());
}

#[wasm_bindgen_test]
fn objects_come_back_as_plain_objects() {
    let storage = fresh();
    let obj = js_sys::JSON::parse(r#"{"a":[1,"two",3.5]}"#).unwrap();
    storage.set("obj".into(), obj, Some(1.0)).unwrap();

    let back = storage.get("obj".into()).unwrap();
    assert!(back.is_instance_of::<Object>());
    let text = js_sys::JSON::stringify(&back).unwrap();
    assert_eq!(String::from(text), r#"{"a":[1,"two",3.5]}"#);
}

#[wasm_bindgen_test]
fn cookie_fallback_when_forced() {
    let storage = fresh();
    storage.force_capabilities(false, true);
    assert_eq!(storage.active_backend().as_deref(), Some("cookies"));

    storage
        .set("&^".into(), JsValue::from_str("?!"), Some(1.0))
        .unwrap();
    assert_eq!(
        storage.get("&^".into()).unwrap().as_string().as_deref(),
        Some("?!")
    );

    let dump = storage.dump_cookies(Some(true)).unwrap();
    assert_eq!(get(&dump, "&^").as_string().as_deref(), Some("?!"));

    assert!(storage.clear().unwrap());
    assert_eq!(storage.keys().unwrap().length(), 0);
    storage.refresh().unwrap();
}

#[wasm_bindgen_test]
fn unavailable_throws_reference_error() {
    let storage = fresh();
    storage.force_capabilities(false, false);
    let err = storage.get("k".into()).unwrap_err();
    assert!(err.is_instance_of::<js_sys::ReferenceError>());
    assert!(!storage.set("k".into(), JsValue::TRUE, Some(3.0)).unwrap());
    assert!(!storage.remove("k".into()).unwrap());
    storage.constructor_refresh().unwrap();
    assert!(storage.storage_available());
}

#[wasm_bindgen_test]
fn iterator_follows_js_protocol() {
    let storage = fresh();
    storage.set("a".into(), JsValue::from_f64(1.0), None).unwrap();
    storage.set(JsValue::from_f64(2.0), "two".into(), None).unwrap();

    let iterator = storage.iterator().unwrap();
    let next: Function = get(&iterator, "next").dyn_into().unwrap();
    let mut seen = Vec::new();
    loop {
        let step = next.call0(&iterator).unwrap();
        if get(&step, "done").as_bool() == Some(true) {
            assert!(get(&step, "value").is_undefined());
            break;
        }
        let entry = get(&step, "value");
        seen.push(get(&entry, "key").as_string().unwrap());
    }
    seen.sort();
    assert_eq!(seen, vec!["2", "a"]);
}

#[wasm_bindgen_test]
fn iterator_works_with_for_of() {
    let storage = fresh();
    storage.set("a".into(), JsValue::from_f64(1.0), None).unwrap();
    storage.set("b".into(), "two".into(), None).unwrap();

    let collect = Function::new_with_args(
        "it",
        "const keys = []; for (const entry of it) keys.push(entry.key); return keys.sort();",
    );
    let keys = collect.call1(&JsValue::NULL, &storage.iterator().unwrap()).unwrap();
    let keys: Vec<String> = Array::from(&keys)
        .iter()
        .filter_map(|key| key.as_string())
        .collect();
    assert_eq!(keys, vec!["a", "b"]);

    let entries = js_sys::try_iter(&storage.iterator().unwrap())
        .unwrap()
        .expect("iterator should be iterable");
    assert_eq!(entries.count(), 2);
}

#[wasm_bindgen_test]
fn static_coerce() {
    assert_eq!(WebStorage::coerce_value("true").unwrap().as_bool(), Some(true));
    assert!(WebStorage::coerce_value("undefined").unwrap().is_undefined());
    assert!(WebStorage::coerce_value("NaN").unwrap().as_f64().unwrap().is_nan());
    assert_eq!(
        WebStorage::coerce_value("plain text")
            .unwrap()
            .as_string()
            .as_deref(),
        Some("plain text")
    );
}

#[wasm_bindgen_test]
fn non_key_input_is_rejected() {
    let storage = fresh();
    let err = storage.get(JsValue::NULL).unwrap_err();
    assert!(err.dyn_ref::<js_sys::Error>().is_some());
}
