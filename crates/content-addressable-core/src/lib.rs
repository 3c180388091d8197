//! # Content Addressable Core
//!
//! Pure primitives for content addressing: canonical encoding, digests, and
//! self-describing content identifiers.
//!
//! This crate contains no I/O and no storage. It is pure computation.
//!
//! ## Pipeline
//!
//! ```text
//! Value -> canonical CBOR bytes -> digest -> multihash -> base58 CID
//! ```
//!
//! ## Key Types
//!
//! - [`Value`] - The structured data model that can be canonicalized
//! - [`Content`] - Capability trait for anything with a canonical form
//! - [`Cid`] - A validated base58 multihash identifier
//! - [`CidOptions`] - Algorithm, multihash label and truncation
//! - [`HashAlgorithm`] / [`Algorithm`] - Pluggable and built-in hash functions
//! - [`CidCache`] - Opt-in bounded identifier memoization
//!
//! ## Usage
//!
//! ```rust
//! use content_addressable_core::{cid_of, Value};
//!
//! let value = Value::map([("foo", "bar")]);
//! let cid = cid_of(&value).unwrap();
//! assert_eq!(cid.decode().unwrap().function_name, "sha3-256");
//! ```

pub mod cache;
pub mod canonical;
pub mod cid;
pub mod content;
pub mod digest;
pub mod error;
pub mod multihash;
pub mod serde_set;
pub mod types;
pub mod value;

pub use cache::{CacheStats, CidCache};
pub use canonical::{canonicalize, decode_canonical};
pub use cid::{cid_of, compute_cid, compute_digest, CidOptions, DEFAULT_ENCODING};
pub use content::{Content, Structured};
pub use digest::{Algorithm, HashAlgorithm};
pub use error::{CodecError, ContentError, ErrorKind, Result};
pub use crate::multihash::Multihash;
pub use types::Cid;
pub use value::Value;
