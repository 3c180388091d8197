//! Error types for content addressing.
//!
//! Every failure surfaces as a [`ContentError`]. Match the whole enum to catch
//! broadly, or a single variant (and [`CodecError`] inside it) to catch narrowly.

use thiserror::Error;

use crate::types::Cid;

/// Root error for canonicalization, hashing, identifier codecs and containers.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The value cannot be canonicalized (unsupported or malformed shape).
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The hash algorithm selector is misconfigured.
    #[error("algorithm error: {0}")]
    Algorithm(String),

    /// Multihash encode/decode was given invalid parameters or input.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A container read found a value that no longer matches its identifier.
    #[error("value tampering on key {key:?}: recorded {recorded}, computed {actual}")]
    Tamper {
        key: String,
        recorded: Cid,
        actual: Cid,
    },
}

/// Multihash codec failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unknown hash function name: {0}")]
    UnknownFunction(String),

    #[error("unknown hash function code: {0:#x}")]
    UnknownCode(u64),

    #[error("invalid digest length {length} (digest has {available} bytes)")]
    InvalidLength { length: usize, available: usize },

    #[error("invalid base58 text: {0}")]
    InvalidBase58(String),

    #[error("malformed multihash: {0}")]
    Malformed(String),
}

/// Coarse classification of a [`ContentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Encoding,
    Algorithm,
    Codec,
    Tamper,
}

impl ContentError {
    pub(crate) fn encoding(msg: impl Into<String>) -> Self {
        ContentError::Encoding(msg.into())
    }

    pub(crate) fn algorithm(msg: impl Into<String>) -> Self {
        ContentError::Algorithm(msg.into())
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Encoding(_) => ErrorKind::Encoding,
            ContentError::Algorithm(_) => ErrorKind::Algorithm,
            ContentError::Codec(_) => ErrorKind::Codec,
            ContentError::Tamper { .. } => ErrorKind::Tamper,
        }
    }

    /// True for integrity violations, as opposed to configuration mistakes.
    pub fn is_tamper(&self) -> bool {
        matches!(self, ContentError::Tamper { .. })
    }
}

/// Result type for content addressing operations.
pub type Result<T> = std::result::Result<T, ContentError>;
