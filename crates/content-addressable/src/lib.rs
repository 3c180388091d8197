//! # Content Addressable
//!
//! Content-addressable data structures built on deterministic content
//! identifiers.
//!
//! ## Overview
//!
//! - **Content identifiers**: any [`Value`] (or [`Content`] type) is
//!   canonicalized, hashed and rendered as a self-describing base58 multihash
//! - **Memo**: a key-value container that records each value's identifier on
//!   write and verifies it on read, failing with [`ContentError::Tamper`]
//!
//! ## Usage
//!
//! ```rust
//! use content_addressable::{Content, Memo, Value};
//!
//! let mut memo = Memo::new();
//! memo.set("foo", Value::from("bar")).unwrap();
//! memo.set("data", Value::map([("safe", true)])).unwrap();
//!
//! assert_eq!(memo.get("foo").unwrap(), Some(Value::from("bar")));
//!
//! // The memo itself is content and has its own identifier.
//! let cid = memo.cid().unwrap();
//! assert_eq!(cid, memo.duplicate().unwrap().cid().unwrap());
//! ```
//!
//! ## Copying
//!
//! [`Memo::duplicate`] is the copy to use: it recomputes every identifier
//! from the copied values, so the result verifies on its own. `Clone` copies
//! the recorded identifiers verbatim and only exists so memos can nest.
//!
//! ## Re-exports
//!
//! - `content_addressable::core` - Canonical encoding, digests, multihash codec

pub mod memo;

pub use content_addressable_core as core;

pub use memo::Memo;

pub use content_addressable_core::{
    cid_of, compute_cid, compute_digest, Algorithm, Cid, CidCache, CidOptions, CodecError,
    Content, ContentError, ErrorKind, HashAlgorithm, Result, Structured, Value,
};
