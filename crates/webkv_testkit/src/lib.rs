//! # webkv Testkit
//!
//! Test utilities for webkv.
//!
//! This crate provides:
//! - Storage fixtures for each backend mode
//! - Property-based test generators using proptest
//! - Cross-crate integration test helpers
//! - `encodeURIComponent` test vectors
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use webkv_testkit::prelude::*;
//!
//! for_each_mode(|storage| {
//!     storage.set("k", &json!([1, 2]), None).unwrap();
//!     assert_eq!(storage.get("k").unwrap(), Some(json!([1, 2])));
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
pub use vectors::*;
