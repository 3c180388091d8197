//! The `Content` capability: anything that can produce a canonical
//! representation, and therefore a content identifier.

use serde::Serialize;

use crate::canonical::canonicalize;
use crate::cid::{compute_cid, compute_digest, DEFAULT_ENCODING};
use crate::digest::Algorithm;
use crate::error::Result;
use crate::types::Cid;
use crate::value::Value;

/// Types that can be content-addressed.
///
/// Only [`Content::to_data`] is required. The identifier methods use the
/// default options (SHA3-256, full length); use
/// [`CidOptions`](crate::CidOptions) for anything else.
pub trait Content {
    /// The structured data this object is identified by.
    fn to_data(&self) -> Result<Value>;

    /// The object as a sequence of rows. Single objects are a one-row list.
    fn as_list(&self) -> Result<Vec<Value>> {
        Ok(vec![self.to_data()?])
    }

    /// Canonical bytes of [`Content::to_data`].
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonicalize(&self.to_data()?)
    }

    /// Raw multihash-ready digest.
    fn multihash(&self) -> Result<Vec<u8>> {
        compute_digest(self, &Algorithm::default(), DEFAULT_ENCODING)
    }

    /// Content identifier.
    fn cid(&self) -> Result<Cid> {
        compute_cid(self, &Algorithm::default(), DEFAULT_ENCODING, None)
    }
}

impl Content for Value {
    fn to_data(&self) -> Result<Value> {
        Ok(self.clone())
    }

    fn as_list(&self) -> Result<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items.clone()),
            other => Ok(vec![other.clone()]),
        }
    }

    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonicalize(self)
    }
}

impl Content for str {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Text(self.to_string()))
    }
}

impl Content for String {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Text(self.clone()))
    }
}

impl Content for bool {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}

impl Content for i64 {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Integer(*self as i128))
    }
}

impl Content for u64 {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Integer(*self as i128))
    }
}

impl Content for [u8] {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Bytes(self.to_vec()))
    }
}

/// A CID is identified as its text, so hashing a CID never reproduces it.
impl Content for Cid {
    fn to_data(&self) -> Result<Value> {
        Ok(Value::Text(self.as_str().to_string()))
    }
}

impl<T: Content + ?Sized> Content for &T {
    fn to_data(&self) -> Result<Value> {
        (**self).to_data()
    }

    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        (**self).canonical_bytes()
    }
}

/// Adapter that content-addresses any `serde::Serialize` type.
///
/// Sequences keep the order they serialize in, so they must iterate
/// deterministically. Collections without a stable order (a `HashSet`, or a
/// `Vec` collected from a `HashMap`) change the identifier from run to
/// run; serialize sets through [`serde_set`](crate::serde_set) instead.
/// `HashMap` itself is safe: maps are sorted by key when encoded.
///
/// ```
/// use content_addressable_core::{Content, Structured};
/// use serde::Serialize;
///
/// #[derive(Clone, Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let cid = Structured(Point { x: 1, y: 2 }).cid().unwrap();
/// assert!(!cid.as_str().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Structured<T>(pub T);

impl<T: Serialize> Content for Structured<T> {
    fn to_data(&self) -> Result<Value> {
        Value::from_serialize(&self.0)
    }
}

impl<T> Structured<T> {
    /// Unwrap the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}
