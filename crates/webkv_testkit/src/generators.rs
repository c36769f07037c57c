//! Property-based test generators using proptest.
//!
//! Provides strategies for generating keys, JSON values and operation
//! sequences that the facade must handle.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

/// Strategy for keys made only of unreserved characters.
///
/// Such keys are stored verbatim, so they compare equal to what
/// [`webkv_core::BrowserStorage::keys`] returns.
pub fn plain_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_.~-]{1,16}").expect("Invalid regex")
}

/// Strategy for arbitrary non-empty keys, including reserved characters
/// and non-ASCII text.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        plain_key_strategy(),
        prop::string::string_regex("[ ;=&^%?!*+,/\"'()~]{1,6}").expect("Invalid regex"),
        "\\PC{1,12}",
    ]
}

/// Strategy for JSON numbers that survive a text round trip exactly.
pub fn number_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::from),
        any::<u64>().prop_map(Number::from),
        (-1_000_000i32..1_000_000).prop_map(|n| {
            Number::from_f64(f64::from(n) / 4.0).unwrap_or_else(|| Number::from(n))
        }),
    ]
}

/// Strategy for JSON scalars.
pub fn json_leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number_strategy().prop_map(Value::Number),
        "\\PC{0,16}".prop_map(Value::String),
        // Strings that look like other JSON values
        prop_oneof![Just("true"), Just("null"), Just("1"), Just("undefined"), Just("")]
            .prop_map(|s| Value::String(s.to_string())),
    ]
}

/// Strategy for arbitrary JSON values with nested arrays and objects.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    json_leaf_strategy().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("\\PC{0,8}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Strategy for cookie lifetimes, including the session and delete cases.
pub fn days_to_live_strategy() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![Just(None), Just(Some(0)), (1i64..3650).prop_map(Some)]
}

/// One facade operation.
#[derive(Debug, Clone)]
pub enum StorageOperation {
    /// Store a value.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: Value,
        /// Cookie lifetime in days.
        days_to_live: Option<i64>,
    },
    /// Remove a key.
    Remove {
        /// Key to remove.
        key: String,
    },
    /// Remove everything.
    Clear,
}

/// Strategy for a single operation over a small key space.
pub fn storage_operation_strategy() -> impl Strategy<Value = StorageOperation> {
    let key = prop::sample::select(vec!["a", "b", "c", "&^", "x y"]).prop_map(String::from);
    prop_oneof![
        6 => (key.clone(), json_value_strategy(), days_to_live_strategy()).prop_map(
            |(key, value, days_to_live)| StorageOperation::Set {
                key,
                value,
                days_to_live,
            }
        ),
        3 => key.prop_map(|key| StorageOperation::Remove { key }),
        1 => Just(StorageOperation::Clear),
    ]
}

/// Strategy for a sequence of operations.
pub fn operation_sequence_strategy(
    max_len: usize,
) -> impl Strategy<Value = Vec<StorageOperation>> {
    prop::collection::vec(storage_operation_strategy(), 1..=max_len)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum number of shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
