//! Content identifier computation.
//!
//! `value -> canonical bytes -> digest -> multihash -> base58`. This is the
//! only entry point other components should use to identify content.

use std::fmt;
use std::sync::Arc;

use crate::content::Content;
use crate::digest::{self, Algorithm, HashAlgorithm};
use crate::error::Result;
use crate::multihash;
use crate::types::Cid;

/// Default multihash function name.
pub const DEFAULT_ENCODING: &str = "sha3-256";

/// How identifiers are computed: algorithm, multihash label, truncation.
#[derive(Clone)]
pub struct CidOptions {
    /// Hash function applied to canonical bytes.
    pub algorithm: Arc<dyn HashAlgorithm>,
    /// Multihash function name written into the identifier.
    pub encoding: String,
    /// Truncate digests to this many bytes (`None` keeps the full digest).
    pub length: Option<usize>,
}

impl CidOptions {
    /// Options for a built-in algorithm, labelled with its own name.
    pub fn for_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm: Arc::new(algorithm),
            encoding: algorithm.as_str().to_string(),
            length: None,
        }
    }

    /// Options for a custom algorithm capability.
    pub fn with_algorithm(algorithm: Arc<dyn HashAlgorithm>, encoding: impl Into<String>) -> Self {
        Self {
            algorithm,
            encoding: encoding.into(),
            length: None,
        }
    }

    /// Truncate identifiers to `length` digest bytes.
    pub fn truncated(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Compute the identifier of some content under these options.
    pub fn cid_of<C: Content + ?Sized>(&self, content: &C) -> Result<Cid> {
        compute_cid(content, self.algorithm.as_ref(), &self.encoding, self.length)
    }

    /// Compute the identifier of already-canonical bytes.
    pub fn cid_of_canonical(&self, bytes: &[u8]) -> Result<Cid> {
        cid_from_canonical(bytes, self.algorithm.as_ref(), &self.encoding, self.length)
    }
}

impl Default for CidOptions {
    fn default() -> Self {
        Self::for_algorithm(Algorithm::default())
    }
}

impl fmt::Debug for CidOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CidOptions")
            .field("algorithm", &self.algorithm.name())
            .field("encoding", &self.encoding)
            .field("length", &self.length)
            .finish()
    }
}

/// Compute the multihash-ready digest of some content.
///
/// `encoding` is validated here so that a digest can only be produced for a
/// label [`compute_cid`] would also accept.
pub fn compute_digest<C: Content + ?Sized>(
    content: &C,
    algorithm: &dyn HashAlgorithm,
    encoding: &str,
) -> Result<Vec<u8>> {
    multihash::function_code(encoding)?;
    let bytes = content.canonical_bytes()?;
    digest::digest(&bytes, algorithm)
}

/// Compute the content identifier of some content.
pub fn compute_cid<C: Content + ?Sized>(
    content: &C,
    algorithm: &dyn HashAlgorithm,
    encoding: &str,
    length: Option<usize>,
) -> Result<Cid> {
    let digest = compute_digest(content, algorithm, encoding)?;
    let text = multihash::encode(&digest, encoding, length)?;
    Ok(Cid::from_trusted(text))
}

/// Identifier of canonical bytes that were produced elsewhere.
pub(crate) fn cid_from_canonical(
    bytes: &[u8],
    algorithm: &dyn HashAlgorithm,
    encoding: &str,
    length: Option<usize>,
) -> Result<Cid> {
    multihash::function_code(encoding)?;
    let digest = digest::digest(bytes, algorithm)?;
    let text = multihash::encode(&digest, encoding, length)?;
    Ok(Cid::from_trusted(text))
}

/// Identifier of some content under the default options (SHA3-256, full length).
pub fn cid_of<C: Content + ?Sized>(content: &C) -> Result<Cid> {
    compute_cid(content, &Algorithm::default(), DEFAULT_ENCODING, None)
}
