//! Test fixtures and helpers.
//!
//! Common values shared by unit tests, property tests and benchmarks.

use content_addressable::{Memo, Value};

/// A spread of values covering every variant, including look-alikes across
/// types (`true` vs `1`, text vs bytes, list vs set).
pub fn test_values() -> Vec<(&'static str, Value)> {
    let pair_set = || Value::set(["foo", "bar"]);

    vec![
        ("true", Value::Bool(true)),
        ("one", Value::Integer(1)),
        ("null", Value::Null),
        ("hundred", Value::Integer(100)),
        ("punctuation", Value::from(";\"{[!&~`'{;\\")),
        ("map", Value::map([("foo", "bar")])),
        ("text", Value::from("foo")),
        ("bytes", Value::bytes(*b"foo")),
        ("set", pair_set()),
        ("tuple", Value::list([1, 3, 7, 10, 10])),
        (
            "nested sets",
            Value::list([
                Value::list([pair_set()]),
                Value::list([pair_set()]),
                Value::list([pair_set()]),
                Value::list([pair_set()]),
            ]),
        ),
        ("frozenset", Value::set([1, 2, 3])),
        ("list of set members", Value::list([1, 2, 3])),
        ("float", Value::Float(1.5)),
        ("empty map", Value::Map(Vec::new())),
        ("empty list", Value::List(Vec::new())),
        ("empty set", Value::Set(Vec::new())),
    ]
}

/// The memo from the classic tamper scenario: `foo -> bar` plus a nested
/// `data -> {safe: true}`.
pub fn sample_memo() -> Memo {
    Memo::create(sample_entries()).expect("sample entries are canonicalizable")
}

/// Entries of [`sample_memo`].
pub fn sample_entries() -> Vec<(&'static str, Value)> {
    vec![
        ("foo", Value::from("bar")),
        ("data", Value::map([("safe", true)])),
    ]
}

/// A moderately sized nested document for benchmarks.
pub fn document(width: usize) -> Value {
    Value::map((0..width).map(|i| {
        (
            format!("field-{}", i),
            Value::map([
                ("index", Value::from(i)),
                ("tags", Value::set(["a", "b", "c"])),
                ("payload", Value::bytes(vec![i as u8; 32])),
            ]),
        )
    }))
}
