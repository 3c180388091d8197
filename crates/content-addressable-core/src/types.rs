//! Strong type definitions for content identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;
use crate::multihash::{self, Multihash};

/// A content identifier: base58 text over a self-describing multihash.
///
/// Values of this type always decode; construct them with [`Cid::parse`] or
/// through [`compute_cid`](crate::compute_cid).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cid(String);

impl Cid {
    /// Parse and validate a CID string.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        multihash::decode(s)?;
        Ok(Self(s.to_string()))
    }

    /// Wrap text produced by the multihash encoder.
    pub(crate) fn from_trusted(s: String) -> Self {
        Self(s)
    }

    /// The base58 text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back into hash function, length and digest.
    pub fn decode(&self) -> Result<Multihash, CodecError> {
        multihash::decode(&self.0)
    }

    /// Consume into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cid({})", self.0)
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cid {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cid {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        multihash::decode(&s)?;
        Ok(Self(s))
    }
}

impl From<Cid> for String {
    fn from(cid: Cid) -> Self {
        cid.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cid_parse_roundtrip() {
        let text = multihash::encode(&[0x42; 32], "sha3-256", None).unwrap();
        let cid = Cid::parse(&text).unwrap();
        assert_eq!(cid.as_str(), text);

        let decoded = cid.decode().unwrap();
        assert_eq!(decoded.function_name, "sha3-256");
        assert_eq!(decoded.length, 32);
    }

    #[test]
    fn test_cid_parse_rejects_garbage() {
        assert!(Cid::parse("not base58 0OIl").is_err());
        assert!("".parse::<Cid>().is_err());
    }

    #[test]
    fn test_cid_serde_validates() {
        let text = multihash::encode(&[0x01; 32], "sha3-256", None).unwrap();
        let json = serde_json::to_string(&Cid::parse(&text).unwrap()).unwrap();
        assert_eq!(json, format!("\"{}\"", text));

        let back: Cid = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), text);

        assert!(serde_json::from_str::<Cid>("\"0000\"").is_err());
    }

    #[test]
    fn test_cid_debug() {
        let cid = Cid::from_trusted("abc".into());
        assert_eq!(format!("{:?}", cid), "Cid(abc)");
        assert_eq!(format!("{}", cid), "abc");
    }
}
