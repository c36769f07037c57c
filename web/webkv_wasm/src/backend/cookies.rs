//! `document.cookie` backend.

use super::map_js_error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Navigator};
use webkv_storage::{BackendError, BackendResult, CookieBackend};

/// The document's cookie jar.
#[derive(Debug, Clone)]
pub struct DocumentCookies {
    document: Option<HtmlDocument>,
    navigator: Option<Navigator>,
}

impl DocumentCookies {
    /// Resolves `window.document` and `window.navigator`.
    pub fn new() -> Self {
        let window = web_sys::window();
        let document = window
            .as_ref()
            .and_then(|window| window.document())
            .and_then(|document| document.dyn_into::<HtmlDocument>().ok());
        let navigator = window.map(|window| window.navigator());
        Self {
            document,
            navigator,
        }
    }

    fn document(&self) -> BackendResult<&HtmlDocument> {
        self.document
            .as_ref()
            .ok_or_else(|| BackendError::unavailable("document is not defined"))
    }
}

impl Default for DocumentCookies {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieBackend for DocumentCookies {
    fn cookie(&self) -> BackendResult<String> {
        self.document()?
            .cookie()
            .map_err(|err| map_js_error(err, None))
    }

    fn set_cookie(&self, assignment: &str) -> BackendResult<()> {
        self.document()?
            .set_cookie(assignment)
            .map_err(|err| map_js_error(err, None))
    }

    fn cookies_enabled(&self) -> Option<bool> {
        let navigator = self.navigator.as_ref()?;
        js_sys::Reflect::get(navigator, &JsValue::from_str("cookieEnabled"))
            .ok()
            .and_then(|value| value.as_bool())
    }
}
