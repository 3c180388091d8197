//! Digest engine: hash functions over canonical bytes.
//!
//! The algorithm is a capability ([`HashAlgorithm`]) rather than a closed
//! enum, so callers can plug in their own. [`digest`] checks that the
//! capability actually produced a digest before anything downstream sees it.

use serde::{Deserialize, Serialize};
use sha3::Digest;
use std::fmt;

use crate::error::{ContentError, Result};

/// A hash function that can digest canonical bytes.
pub trait HashAlgorithm: Send + Sync {
    /// Multihash function name, e.g. `"sha3-256"`.
    fn name(&self) -> &str;

    /// Digest length in bytes.
    fn output_len(&self) -> usize;

    /// Hash the input.
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// Built-in hash algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-512")]
    Sha3_512,
    #[serde(rename = "sha2-256")]
    Sha2_256,
    #[serde(rename = "sha2-512")]
    Sha2_512,
    #[serde(rename = "blake3")]
    Blake3,
}

impl Algorithm {
    /// All built-in algorithms.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Sha3_256,
        Algorithm::Sha3_512,
        Algorithm::Sha2_256,
        Algorithm::Sha2_512,
        Algorithm::Blake3,
    ];

    /// The multihash function name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_512 => "sha3-512",
            Algorithm::Sha2_256 => "sha2-256",
            Algorithm::Sha2_512 => "sha2-512",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Resolve a built-in algorithm by multihash function name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| ContentError::algorithm(format!("unsupported hash algorithm: {}", name)))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HashAlgorithm for Algorithm {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn output_len(&self) -> usize {
        match self {
            Algorithm::Sha3_256 | Algorithm::Sha2_256 | Algorithm::Blake3 => 32,
            Algorithm::Sha3_512 | Algorithm::Sha2_512 => 64,
        }
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Algorithm::Sha3_256 => sha3::Sha3_256::digest(data).to_vec(),
            Algorithm::Sha3_512 => sha3::Sha3_512::digest(data).to_vec(),
            Algorithm::Sha2_256 => sha2::Sha256::digest(data).to_vec(),
            Algorithm::Sha2_512 => sha2::Sha512::digest(data).to_vec(),
            Algorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        }
    }
}

/// Digest canonical bytes with the given algorithm.
///
/// Fails with [`ContentError::Algorithm`] when the algorithm returns no
/// digest, or one whose length disagrees with its declared output length.
pub fn digest(bytes: &[u8], algorithm: &dyn HashAlgorithm) -> Result<Vec<u8>> {
    let out = algorithm.digest(bytes);

    if out.is_empty() {
        return Err(ContentError::algorithm(format!(
            "algorithm {} did not produce a digest",
            algorithm.name()
        )));
    }
    if out.len() != algorithm.output_len() {
        return Err(ContentError::algorithm(format!(
            "algorithm {} produced {} bytes, declared {}",
            algorithm.name(),
            out.len(),
            algorithm.output_len()
        )));
    }

    tracing::trace!(algorithm = algorithm.name(), input_len = bytes.len(), "digested");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl HashAlgorithm for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn output_len(&self) -> usize {
            32
        }

        fn digest(&self, _data: &[u8]) -> Vec<u8> {
            Vec::new()
        }
    }

    struct Liar;

    impl HashAlgorithm for Liar {
        fn name(&self) -> &str {
            "liar"
        }

        fn output_len(&self) -> usize {
            32
        }

        fn digest(&self, data: &[u8]) -> Vec<u8> {
            data.to_vec()
        }
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hex::encode(digest(b"abc", &Algorithm::Sha3_256).unwrap()),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_eq!(
            hex::encode(digest(b"", &Algorithm::Sha3_256).unwrap()),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex::encode(digest(b"abc", &Algorithm::Sha2_256).unwrap()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_output_lengths() {
        for algorithm in Algorithm::ALL {
            let out = digest(b"data", &algorithm).unwrap();
            assert_eq!(out.len(), algorithm.output_len(), "{}", algorithm);
        }
    }

    #[test]
    fn test_from_name() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_name(algorithm.as_str()).unwrap(), algorithm);
        }
        let err = Algorithm::from_name("md5").unwrap_err();
        assert!(matches!(err, ContentError::Algorithm(_)));
    }

    #[test]
    fn test_empty_digest_rejected() {
        let err = digest(b"data", &Broken).unwrap_err();
        assert!(matches!(err, ContentError::Algorithm(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = digest(b"short", &Liar).unwrap_err();
        assert!(matches!(err, ContentError::Algorithm(_)));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Algorithm::Sha3_256).unwrap();
        assert_eq!(json, "\"sha3-256\"");
        let back: Algorithm = serde_json::from_str("\"blake3\"").unwrap();
        assert_eq!(back, Algorithm::Blake3);
    }
}
