//! Error types for WASM bindings.

use thiserror::Error;
use wasm_bindgen::prelude::*;
use webkv_core::StorageError;

/// Errors that can occur in the WASM bindings.
#[derive(Debug, Error)]
pub enum WasmError {
    /// No browser storage was usable at the last refresh.
    #[error("{0}")]
    Unavailable(String),

    /// The selected backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored entry could not be decoded, or a value could not be encoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// JavaScript error occurred.
    #[error("JS error: {0}")]
    JsError(String),
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        let message = err.to_string();
        match err {
            WasmError::Unavailable(_) => js_sys::ReferenceError::new(&message).into(),
            _ => js_sys::Error::new(&message).into(),
        }
    }
}

impl From<JsValue> for WasmError {
    fn from(val: JsValue) -> Self {
        WasmError::JsError(val.as_string().unwrap_or_else(|| format!("{:?}", val)))
    }
}

impl From<StorageError> for WasmError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable => WasmError::Unavailable(err.to_string()),
            StorageError::Backend(inner) => WasmError::Storage(inner.to_string()),
            StorageError::Codec(inner) => WasmError::Codec(inner.to_string()),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WasmError::InvalidInput(err.to_string())
    }
}

/// Result type for WASM operations.
pub type WasmResult<T> = Result<T, WasmError>;
