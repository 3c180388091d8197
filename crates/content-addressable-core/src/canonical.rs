//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding over [`Value`]:
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - Map keys sorted by encoded byte comparison, duplicates rejected
//! - Sets are tag 258 over an array sorted by encoded bytes, deduplicated
//! - Floats always 64-bit, `-0.0` folded to `0.0`, non-finite rejected
//!
//! The canonical encoding is the root of every identifier: the same logical
//! value must produce identical bytes on every platform and in every process.
//! **This encoding is FROZEN.** Changes invalidate every recorded CID.

use crate::error::{ContentError, Result};
use crate::value::{Value, SET_TAG};

/// Encode a value to canonical bytes.
pub fn canonicalize(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Decode canonical bytes back into a value.
///
/// Input that parses as CBOR but is not in canonical form (unsorted keys,
/// oversized integer headers, 32-bit floats, ...) is rejected.
pub fn decode_canonical(bytes: &[u8]) -> Result<Value> {
    let cbor: ciborium::value::Value =
        ciborium::from_reader(bytes).map_err(|e| ContentError::encoding(e.to_string()))?;
    let value = Value::try_from(cbor)?;

    if canonicalize(&value)? != bytes {
        return Err(ContentError::encoding("input is not in canonical form"));
    }
    Ok(value)
}

/// Recursively encode a value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Null => buf.push(0xf6),
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Integer(n) => encode_integer(buf, *n)?,
        Value::Float(f) => encode_float(buf, *f)?,
        Value::Text(s) => encode_text(buf, s),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::List(items) => encode_array(buf, items)?,
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Set(items) => encode_set_canonical(buf, items)?,
    }
    Ok(())
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, n: i128) -> Result<()> {
    if n >= 0 {
        let n = u64::try_from(n)
            .map_err(|_| ContentError::encoding(format!("integer {} exceeds 64 bits", n)))?;
        encode_uint(buf, 0, n);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = u64::try_from(-1 - n)
            .map_err(|_| ContentError::encoding(format!("integer {} exceeds 64 bits", n)))?;
        encode_uint(buf, 1, abs);
    }
    Ok(())
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a float as IEEE-754 double (major type 7, additional info 27).
fn encode_float(buf: &mut Vec<u8>, f: f64) -> Result<()> {
    if !f.is_finite() {
        return Err(ContentError::encoding(format!("non-finite float {}", f)));
    }
    // -0.0 == 0.0, so both must share one encoding.
    let f = if f == 0.0 { 0.0 } else { f };
    buf.push(0xfb);
    buf.extend_from_slice(&f.to_bits().to_be_bytes());
    Ok(())
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, items: &[Value]) -> Result<()> {
    encode_uint(buf, 4, items.len() as u64);
    for item in items {
        encode_value_to(buf, item)?;
    }
    Ok(())
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<()> {
    // Encode all keys first to sort by encoded bytes
    let mut key_value_pairs = entries
        .iter()
        .map(|(k, v)| Ok((canonicalize(k)?, v)))
        .collect::<Result<Vec<(Vec<u8>, &Value)>>>()?;

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    if key_value_pairs.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(ContentError::encoding("duplicate map key"));
    }

    encode_uint(buf, 5, key_value_pairs.len() as u64);
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}

/// Encode a set canonically: tag 258 over sorted, deduplicated elements.
fn encode_set_canonical(buf: &mut Vec<u8>, items: &[Value]) -> Result<()> {
    let mut encoded = items
        .iter()
        .map(canonicalize)
        .collect::<Result<Vec<Vec<u8>>>>()?;

    encoded.sort();
    encoded.dedup();

    encode_uint(buf, 6, SET_TAG);
    encode_uint(buf, 4, encoded.len() as u64);
    for item in encoded {
        buf.extend_from_slice(&item);
    }
    Ok(())
}
