//! # Content Addressable Testkit
//!
//! Testing utilities for content identifiers and memos.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Frozen canonical encodings for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Shared values and memos for tests and benchmarks
//!
//! ## Golden Vectors
//!
//! ```rust
//! use content_addressable_testkit::vectors::{all_vectors, report};
//!
//! for vector in all_vectors() {
//!     let report = report(&vector);
//!     println!("{}: {} -> {}", vector.name, report.canonical_hex, report.cid);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use content_addressable::cid_of;
//! use content_addressable_testkit::generators::value;
//!
//! proptest! {
//!     #[test]
//!     fn cid_is_deterministic(v in value()) {
//!         prop_assert_eq!(cid_of(&v)?, cid_of(&v.clone())?);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{document, sample_entries, sample_memo, test_values};
pub use vectors::{all_vectors, reports_json, verify_all_vectors, GoldenVector, VectorReport};
