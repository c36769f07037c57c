//! # webkv WASM
//!
//! WebAssembly bindings for webkv over the browser's own storage.
//!
//! This crate provides:
//! - A `localStorage` backend
//! - A `document.cookie` backend
//! - JavaScript-friendly API via wasm-bindgen
//!
//! ## Storage Backend Selection
//!
//! Both facilities are probed when a handle is created:
//! 1. **localStorage** (preferred) - used whenever a probe write reads back
//! 2. **Cookies** (fallback) - used when `localStorage` is missing, full,
//!    or blocked
//!
//! With neither, reads throw a `ReferenceError` and writes return `false`.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { BrowserStorage } from 'webkv_wasm';
//!
//! async function main() {
//!     await init();
//!
//!     const storage = new BrowserStorage();
//!     storage.set("count", 42, 1);
//!     console.log(storage.get("count")); // 42
//!     storage.remove("count");
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod storage;
mod utils;

pub use backend::{DocumentCookies, WebLocalStorage};
pub use error::*;
pub use storage::*;

use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// This sets up panic hooks for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}
