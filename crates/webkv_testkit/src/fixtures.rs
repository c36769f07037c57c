//! Storage fixtures.
//!
//! Each fixture owns a facade together with handles to its in-memory
//! backends, so tests can inspect what actually landed in the local store or
//! the cookie jar.

use tracing_subscriber::EnvFilter;
use webkv_core::BrowserStorage;
use webkv_storage::{InMemoryCookieJar, InMemoryKeyValue};

/// Which backend a fixture routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Working local store; cookies also work but are not used.
    LocalStore,
    /// No local store; cookies are the fallback.
    CookiesOnly,
    /// Neither backend is usable.
    Unavailable,
}

impl StorageMode {
    /// Modes in which storage is available.
    pub const AVAILABLE: [StorageMode; 2] = [StorageMode::LocalStore, StorageMode::CookiesOnly];
}

/// A facade over in-memory backends.
pub struct TestStorage {
    /// The facade under test.
    pub storage: BrowserStorage,
    /// Shared handle to the local store backend.
    pub local: InMemoryKeyValue,
    /// Shared handle to the cookie backend.
    pub jar: InMemoryCookieJar,
    mode: StorageMode,
}

impl TestStorage {
    /// Creates a fixture in the given mode.
    pub fn new(mode: StorageMode) -> Self {
        let (local, jar) = match mode {
            StorageMode::LocalStore => (InMemoryKeyValue::new(), InMemoryCookieJar::new()),
            StorageMode::CookiesOnly => (InMemoryKeyValue::absent(), InMemoryCookieJar::new()),
            StorageMode::Unavailable => {
                (InMemoryKeyValue::absent(), InMemoryCookieJar::blocked())
            }
        };
        let storage = BrowserStorage::new(local.clone(), jar.clone())
            .expect("Failed to probe in-memory backends");
        Self {
            storage,
            local,
            jar,
            mode,
        }
    }

    /// Creates a fixture backed by a working local store.
    pub fn local_store() -> Self {
        Self::new(StorageMode::LocalStore)
    }

    /// Creates a fixture that falls back to cookies.
    pub fn cookies_only() -> Self {
        Self::new(StorageMode::CookiesOnly)
    }

    /// Creates a fixture without any usable storage.
    pub fn unavailable() -> Self {
        Self::new(StorageMode::Unavailable)
    }

    /// Returns the mode this fixture was created in.
    pub fn mode(&self) -> StorageMode {
        self.mode
    }
}

impl std::ops::Deref for TestStorage {
    type Target = BrowserStorage;

    fn deref(&self) -> &Self::Target {
        &self.storage
    }
}

impl std::ops::DerefMut for TestStorage {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.storage
    }
}

/// Runs a test once against a fresh fixture in every available mode.
///
/// # Example
///
/// ```rust
/// use webkv_testkit::for_each_mode;
///
/// for_each_mode(|storage| {
///     assert!(storage.storage_available());
/// });
/// ```
pub fn for_each_mode<F>(mut f: F)
where
    F: FnMut(&TestStorage),
{
    for mode in StorageMode::AVAILABLE {
        let fixture = TestStorage::new(mode);
        f(&fixture);
    }
}

/// Runs a test with a fixture in the given mode.
pub fn with_storage<F, R>(mode: StorageMode, f: F) -> R
where
    F: FnOnce(&TestStorage) -> R,
{
    let fixture = TestStorage::new(mode);
    f(&fixture)
}

/// Installs a test-friendly tracing subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;
    use serde_json::{json, Value};

    /// The values stored by [`populated_storage`], in insertion order.
    pub fn sample_entries() -> Vec<(&'static str, Value)> {
        vec![
            ("count", json!(42)),
            ("flag", json!(false)),
            ("obj", json!({"a": [1, "two", 3.5]})),
            ("&^", json!("?!")),
            ("\u{2672}", json!("universal recycling")),
        ]
    }

    /// Creates a fixture pre-populated with [`sample_entries`].
    pub fn populated_storage(mode: StorageMode) -> TestStorage {
        let fixture = TestStorage::new(mode);
        for (key, value) in sample_entries() {
            fixture
                .set(key, &value, Some(1))
                .expect("Failed to populate storage");
        }
        fixture
    }
}
