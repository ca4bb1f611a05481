//! Stable JSON encoding.
//!
//! Gas and fee estimates are functions of serialized byte length, so the
//! serialization must not depend on how an object was built. Every object is
//! re-emitted with its keys in lexicographic order.

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Recursively sort object keys.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serialize `value` to JSON bytes with sorted keys.
pub fn to_canonical_vec<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let value = serde_json::to_value(value)?;
    serde_json::to_vec(&canonicalize(value))
}

/// Serialize `value` to a JSON string with sorted keys.
pub fn to_canonical_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let value = serde_json::to_value(value)?;
    serde_json::to_string(&canonicalize(value))
}

/// Byte blob rendered as `{"type":"Buffer","data":[...]}`.
///
/// This is the form the gas regression was fitted against, so message size
/// must be measured with blobs expanded this way.
struct BufferJson<'a>(&'a [u8]);

impl Serialize for BufferJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Buffer", 2)?;
        state.serialize_field("type", "Buffer")?;
        state.serialize_field("data", self.0)?;
        state.end()
    }
}

/// `serialize_with` helper for a single blob.
pub fn serialize_buffer<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    BufferJson(bytes).serialize(serializer)
}

/// `serialize_with` helper for a list of blobs.
pub fn serialize_buffers<S: Serializer>(
    blobs: &[Vec<u8>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(blobs.len()))?;
    for blob in blobs {
        seq.serialize_element(&BufferJson(blob))?;
    }
    seq.end()
}
