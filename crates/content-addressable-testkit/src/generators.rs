//! Proptest generators for property-based testing.

use proptest::prelude::*;

use content_addressable::core::multihash::MAX_DIGEST_LEN;
use content_addressable::{Algorithm, Value};

/// A finite float (the only kind the encoder accepts).
pub fn finite_float() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

/// Any integer the canonical encoder accepts.
pub fn integer() -> impl Strategy<Value = i128> {
    prop_oneof![
        any::<i64>().prop_map(i128::from),
        any::<u64>().prop_map(i128::from),
        (0u64..=u64::MAX).prop_map(|n| -1 - i128::from(n)),
    ]
}

/// A short map key.
pub fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}".prop_map(String::from)
}

/// A non-container value.
pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        integer().prop_map(Value::Integer),
        finite_float().prop_map(Value::Float),
        ".{0,16}".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
    ]
}

/// An arbitrary canonicalizable value, nested up to a few levels.
///
/// Maps have distinct text keys, so every generated value encodes.
pub fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Set),
            prop::collection::btree_map(key(), inner, 0..6).prop_map(|entries| {
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::Text(k), v))
                        .collect(),
                )
            }),
        ]
    })
}

/// Distinct key/value pairs for populating a memo.
pub fn memo_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map(key(), value(), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

/// A built-in hash algorithm.
pub fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

/// A digest of up to the codec's maximum length.
pub fn digest() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=MAX_DIGEST_LEN)
}
