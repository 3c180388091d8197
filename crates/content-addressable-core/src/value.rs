//! The structured value model accepted by the canonical encoder.
//!
//! [`Value`] is a closed universe: scalars, ordered lists, maps and sets.
//! Anything implementing `serde::Serialize` can be brought into it through
//! [`Value::from_serialize`].

use ciborium::value::Value as Cbor;
use serde::Serialize;

use crate::error::{ContentError, Result};

/// CBOR tag for a mathematical finite set (IANA registry, tag 258).
pub const SET_TAG: u64 = 258;

/// A structured datum that can be canonicalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Any integer in `-2^64 ..= 2^64 - 1`; wider values fail to encode.
    Integer(i128),
    /// Finite floats only; NaN and infinities fail to encode.
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// Ordered sequence. Order is significant.
    List(Vec<Value>),
    /// Key/value pairs. Insertion order is not significant.
    Map(Vec<(Value, Value)>),
    /// Unordered collection. Order and duplicates are not significant.
    Set(Vec<Value>),
}

impl Value {
    /// Build a byte string.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// Build a list from anything convertible into values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a set from anything convertible into values.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from key/value pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Convert any serializable type into a value.
    ///
    /// Structs and maps become [`Value::Map`], sequences become
    /// [`Value::List`]. Serde has no notion of a set, so a `HashSet` arrives
    /// as a list in hasher order. Mark such fields with
    /// [`serde_set::serialize`](crate::serde_set::serialize) to get a
    /// [`Value::Set`]; CBOR tag 258 is read back as a set.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let cbor = Cbor::serialized(value).map_err(|e| ContentError::encoding(e.to_string()))?;
        Value::try_from(cbor)
    }

    /// Look up a text key in a map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, Value::Text(t) if t == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Mutable variant of [`Value::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Map(entries) => entries
                .iter_mut()
                .find(|(k, _)| matches!(k, Value::Text(t) if t == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
        }
    }
}

impl TryFrom<Cbor> for Value {
    type Error = ContentError;

    fn try_from(cbor: Cbor) -> Result<Self> {
        Ok(match cbor {
            Cbor::Null => Value::Null,
            Cbor::Bool(b) => Value::Bool(b),
            Cbor::Integer(i) => Value::Integer(i.into()),
            Cbor::Float(f) => Value::Float(f),
            Cbor::Text(s) => Value::Text(s),
            Cbor::Bytes(b) => Value::Bytes(b),
            Cbor::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            Cbor::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| Ok((Value::try_from(k)?, Value::try_from(v)?)))
                    .collect::<Result<_>>()?,
            ),
            Cbor::Tag(SET_TAG, inner) => match *inner {
                Cbor::Array(items) => Value::Set(
                    items
                        .into_iter()
                        .map(Value::try_from)
                        .collect::<Result<_>>()?,
                ),
                _ => return Err(ContentError::encoding("set tag must wrap an array")),
            },
            Cbor::Tag(tag, _) => {
                return Err(ContentError::encoding(format!("unsupported CBOR tag {}", tag)))
            }
            _ => return Err(ContentError::encoding("unsupported CBOR value type")),
        })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(n as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
