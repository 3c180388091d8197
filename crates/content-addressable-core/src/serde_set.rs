//! Serialize unordered collections as sets.
//!
//! Serde has no set type: a `HashSet` serializes as a plain sequence in
//! hasher order, which would become an order-sensitive [`Value::List`].
//! Fields marked with this helper are emitted under CBOR tag 258 instead and
//! arrive as [`Value::Set`], which the canonical encoder sorts.
//!
//! ```
//! use std::collections::HashSet;
//! use content_addressable_core::{Content, Structured};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Doc {
//!     #[serde(serialize_with = "content_addressable_core::serde_set::serialize")]
//!     tags: HashSet<String>,
//! }
//!
//! let doc = Doc { tags: ["a".to_string(), "b".to_string()].into() };
//! assert!(Structured(doc).cid().is_ok());
//! ```
//!
//! [`Value::List`]: crate::Value::List
//! [`Value::Set`]: crate::Value::Set

use ciborium::tag::Required;
use serde::{Serialize, Serializer};

use crate::value::SET_TAG;

/// `serialize_with` target for any collection whose iteration order is not
/// meaningful.
pub fn serialize<'a, C, T, S>(set: &'a C, serializer: S) -> Result<S::Ok, S::Error>
where
    &'a C: IntoIterator<Item = &'a T>,
    T: Serialize + 'a,
    S: Serializer,
{
    let items: Vec<&T> = set.into_iter().collect();
    Required::<_, { SET_TAG }>(items).serialize(serializer)
}
