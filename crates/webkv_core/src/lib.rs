//! # webkv Core
//!
//! A small key/value facade that persists JSON values in the browser.
//!
//! This crate provides:
//! - Capability probing for the local store and the cookie jar
//! - Routing of every operation to the best usable backend
//! - Typed and untyped reads over percent-encoded JSON
//! - Entry iteration and bulk dumps
//!
//! ## Backend Selection
//!
//! On construction (and on [`BrowserStorage::refresh`]) both backends are
//! probed. The local store wins when it works; cookies are the fallback.
//! With neither, reads fail with [`StorageError::Unavailable`] and writes
//! return `false`.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use webkv_core::{ActiveBackend, BrowserStorage};
//! use webkv_storage::{InMemoryCookieJar, InMemoryKeyValue};
//!
//! // No local store: everything goes to cookies.
//! let storage = BrowserStorage::new(InMemoryKeyValue::absent(), InMemoryCookieJar::new()).unwrap();
//! assert_eq!(storage.active_backend(), Some(ActiveBackend::Cookies));
//!
//! storage.set("obj", &json!({"a": [1, "two", 3.5]}), Some(7)).unwrap();
//! assert_eq!(storage.get("obj").unwrap(), Some(json!({"a": [1, "two", 3.5]})));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dump;
mod error;
mod iter;
mod probe;
mod storage;
mod strategy;

pub use config::Config;
pub use dump::{dump_cookies, dump_local_store, Dump};
pub use error::{StorageError, StorageResult};
pub use iter::{Entries, Entry};
pub use probe::{detect_cookie_support, detect_key_value_support};
pub use storage::{BrowserStorage, Capabilities};
pub use strategy::ActiveBackend;

// Re-export the types that appear in this crate's signatures
pub use webkv_codec::{Coerced, StorageKey};
