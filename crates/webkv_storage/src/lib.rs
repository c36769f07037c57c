//! # webkv Storage
//!
//! Host storage backend contracts and implementations for webkv.
//!
//! This crate is the lowest layer of webkv. Backends are **string stores**
//! that know nothing about the JSON values or the percent-encoding the
//! facade layers on top of them.
//!
//! ## Backend Contracts
//!
//! - [`KeyValueBackend`] - A map-like local store (`setItem`, `getItem`, ...)
//! - [`CookieBackend`] - A single cookie string, mutated by assignment
//!
//! ## Available Backends
//!
//! - [`InMemoryKeyValue`] - Insertion-ordered local store
//! - [`InMemoryCookieJar`] - Cookie jar with browser expiry rules
//!
//! Browser-backed implementations live in the `webkv_wasm` crate.
//!
//! ## Example
//!
//! ```rust
//! use webkv_storage::{CookieBackend, InMemoryCookieJar, InMemoryKeyValue, KeyValueBackend};
//!
//! let store = InMemoryKeyValue::new();
//! store.set_item("theme", "%22dark%22").unwrap();
//! assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("%22dark%22"));
//!
//! let jar = InMemoryCookieJar::new();
//! jar.set_cookie("theme=%22dark%22; path=/").unwrap();
//! assert_eq!(jar.cookie().unwrap(), "theme=%22dark%22");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod jar;
mod memory;

pub use backend::{CookieBackend, KeyValueBackend};
pub use error::{BackendError, BackendResult};
pub use jar::InMemoryCookieJar;
pub use memory::InMemoryKeyValue;
