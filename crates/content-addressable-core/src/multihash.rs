//! Multihash codec: self-describing digests rendered as base58 text.
//!
//! Binary layout (unsigned varints, per the multiformats table):
//!
//! ```text
//! varint(function code) || varint(digest length) || digest
//! ```
//!
//! The text form is that byte string in the Bitcoin base58 alphabet, which is
//! safe in filenames, URLs and plain text without escaping.

use crate::error::CodecError;

/// Largest digest the codec will frame.
pub const MAX_DIGEST_LEN: usize = 64;

type RawMultihash = ::multihash::Multihash<MAX_DIGEST_LEN>;

/// Multihash function table: name and code.
const FUNCTIONS: &[(&str, u64)] = &[
    ("identity", 0x00),
    ("sha2-256", 0x12),
    ("sha2-512", 0x13),
    ("sha3-512", 0x14),
    ("sha3-384", 0x15),
    ("sha3-256", 0x16),
    ("sha3-224", 0x17),
    ("blake3", 0x1e),
];

/// A decoded multihash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multihash {
    /// Hash function name, e.g. `"sha3-256"`.
    pub function_name: &'static str,
    /// Digest length in bytes (after any truncation).
    pub length: usize,
    /// The (possibly truncated) digest.
    pub digest: Vec<u8>,
}

/// Map a function name to its multihash code.
pub fn function_code(name: &str) -> Result<u64, CodecError> {
    FUNCTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
        .ok_or_else(|| CodecError::UnknownFunction(name.to_string()))
}

/// Map a multihash code to its function name.
pub fn function_name(code: u64) -> Result<&'static str, CodecError> {
    FUNCTIONS
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
        .ok_or(CodecError::UnknownCode(code))
}

/// Frame a digest as multihash bytes.
///
/// `length` defaults to the full digest; a shorter length truncates.
pub fn encode_bytes(
    digest: &[u8],
    function: &str,
    length: Option<usize>,
) -> Result<Vec<u8>, CodecError> {
    let code = function_code(function)?;
    let length = length.unwrap_or(digest.len());

    if length == 0 || length > digest.len() || length > MAX_DIGEST_LEN {
        return Err(CodecError::InvalidLength {
            length,
            available: digest.len(),
        });
    }

    let mh = RawMultihash::wrap(code, &digest[..length])
        .map_err(|e| CodecError::Malformed(e.to_string()))?;
    Ok(mh.to_bytes())
}

/// Encode a digest as base58 multihash text.
pub fn encode(digest: &[u8], function: &str, length: Option<usize>) -> Result<String, CodecError> {
    let bytes = encode_bytes(digest, function, length)?;
    Ok(bs58::encode(bytes).into_string())
}

/// Parse multihash bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<Multihash, CodecError> {
    let mh = RawMultihash::from_bytes(bytes).map_err(|e| CodecError::Malformed(e.to_string()))?;
    let function_name = function_name(mh.code())?;

    let digest = mh.digest().to_vec();
    if digest.is_empty() {
        return Err(CodecError::InvalidLength {
            length: 0,
            available: 0,
        });
    }

    Ok(Multihash {
        function_name,
        length: digest.len(),
        digest,
    })
}

/// Parse base58 multihash text.
pub fn decode(text: &str) -> Result<Multihash, CodecError> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| CodecError::InvalidBase58(e.to_string()))?;
    decode_bytes(&bytes)
}
