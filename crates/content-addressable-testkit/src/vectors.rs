//! Golden test vectors for deterministic verification.
//!
//! The canonical bytes below are frozen: any implementation that claims to
//! produce compatible identifiers must reproduce them exactly. Identifiers
//! follow from the bytes through SHA3-256 and are reported rather than pinned.

use serde::Serialize;

use content_addressable::core::canonicalize;
use content_addressable::{cid_of, Value};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Builds the input value.
    pub build: fn() -> Value,
    /// Expected canonical bytes (hex).
    pub canonical_hex: &'static str,
}

/// What an implementation produced for a vector.
#[derive(Debug, Clone, Serialize)]
pub struct VectorReport {
    pub name: String,
    pub canonical_hex: String,
    pub cid: String,
    pub matches: bool,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "true",
            build: || Value::Bool(true),
            canonical_hex: "f5",
        },
        GoldenVector {
            name: "null",
            build: || Value::Null,
            canonical_hex: "f6",
        },
        GoldenVector {
            name: "integer 100",
            build: || Value::Integer(100),
            canonical_hex: "1864",
        },
        GoldenVector {
            name: "integer -1000",
            build: || Value::Integer(-1000),
            canonical_hex: "3903e7",
        },
        GoldenVector {
            name: "text foo",
            build: || Value::from("foo"),
            canonical_hex: "63666f6f",
        },
        GoldenVector {
            name: "bytes dead",
            build: || Value::bytes(vec![0xde, 0xad]),
            canonical_hex: "42dead",
        },
        GoldenVector {
            name: "float 1.5",
            build: || Value::Float(1.5),
            canonical_hex: "fb3ff8000000000000",
        },
        GoldenVector {
            name: "list of true",
            build: || Value::list([true]),
            canonical_hex: "81f5",
        },
        GoldenVector {
            name: "list of one",
            build: || Value::list([1]),
            canonical_hex: "8101",
        },
        GoldenVector {
            name: "tuple with repeats",
            build: || Value::list([1, 3, 7, 10, 10]),
            canonical_hex: "850103070a0a",
        },
        GoldenVector {
            name: "map foo bar",
            build: || Value::map([("foo", "bar")]),
            canonical_hex: "a163666f6f63626172",
        },
        GoldenVector {
            name: "nested map, keys out of order",
            build: || {
                Value::map([
                    ("data", Value::map([("safe", true)])),
                    ("foo", Value::from("bar")),
                ])
            },
            canonical_hex: "a263666f6f636261726464617461a16473616665f5",
        },
        GoldenVector {
            name: "set foo bar",
            build: || Value::set(["foo", "bar"]),
            canonical_hex: "d90102826362617263666f6f",
        },
        GoldenVector {
            name: "frozenset 1 2 3, shuffled",
            build: || Value::set([3, 1, 2, 3]),
            canonical_hex: "d9010283010203",
        },
        GoldenVector {
            name: "empty containers",
            build: || {
                Value::list([
                    Value::Map(Vec::new()),
                    Value::List(Vec::new()),
                    Value::Set(Vec::new()),
                ])
            },
            canonical_hex: "83a080d9010280",
        },
    ]
}

/// Compute a report for one vector.
pub fn report(vector: &GoldenVector) -> VectorReport {
    let value = (vector.build)();
    let canonical_hex = canonicalize(&value)
        .map(hex::encode)
        .unwrap_or_default();
    let cid = cid_of(&value)
        .map(|c| c.into_string())
        .unwrap_or_default();

    VectorReport {
        name: vector.name.to_string(),
        matches: canonical_hex == vector.canonical_hex,
        canonical_hex,
        cid,
    }
}

/// Verify all golden vectors.
///
/// Call this to verify your implementation matches the reference.
pub fn verify_all_vectors() -> Vec<VectorReport> {
    all_vectors().iter().map(report).collect()
}

/// All reports as pretty JSON, for publishing alongside other implementations.
pub fn reports_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&verify_all_vectors())
}
