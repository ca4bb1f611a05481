//! Content payload to ISCN record formatting.
//!
//! # Responsibilities
//! - Pick the content fingerprints (`hashes`, else `[hash]`)
//! - Build the author stakeholder blob
//! - Build the schema.org JSON-LD metadata blob from the remaining fields

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::iscn::codec::{serialize_buffer, serialize_buffers, to_canonical_vec};

/// JSON-LD context of the metadata blob.
pub const SCHEMA_ORG_CONTEXT: &str = "http://schema.org/";

/// `@type` used when the payload does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "CreativeWork";

/// Contribution type URI given to the payload author.
pub const AUTHOR_CONTRIBUTION_TYPE: &str = "http://schema.org/author";

/// Errors raised while formatting a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Neither `hash` nor `hashes` was supplied.
    #[error("payload must supply `hash` or a non-empty `hashes`")]
    MissingFingerprint,

    /// A JSON blob could not be serialized.
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for payload formatting.
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Content description supplied by the caller.
///
/// Any key that is not one of the distinguished fields is kept in `fields`
/// and copied into the record metadata unchanged. Distinguished metadata
/// fields keep their JSON value as given, so an explicit `null` is `Some(Null)`
/// and still lands in the metadata; only an absent key is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<Value>,
    /// Passthrough fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A key that is present deserializes to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// `null`, `false`, `0` and `""` count as unset for the author and type fallbacks.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Transaction input: a content payload plus the record to update, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IscnTxInput {
    #[serde(rename = "iscnId", default, skip_serializing_if = "Option::is_none")]
    pub iscn_id: Option<String>,
    #[serde(flatten)]
    pub payload: ContentPayload,
}

impl IscnTxInput {
    /// Input that registers a new record.
    pub fn create(payload: ContentPayload) -> Self {
        Self {
            iscn_id: None,
            payload,
        }
    }

    /// Input that updates the record `iscn_id`.
    pub fn update(iscn_id: impl Into<String>, payload: ContentPayload) -> Self {
        Self {
            iscn_id: Some(iscn_id.into()),
            payload,
        }
    }
}

/// The three chain-record fields derived from a payload.
///
/// Serializes the way the gas model measures it: blobs expanded to their
/// buffer form, camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedRecord {
    /// Always empty.
    pub record_notes: String,
    pub content_fingerprints: Vec<String>,
    #[serde(serialize_with = "serialize_buffers")]
    pub stakeholders: Vec<Vec<u8>>,
    #[serde(serialize_with = "serialize_buffer")]
    pub content_metadata: Vec<u8>,
}

impl FormattedRecord {
    /// Total size of the opaque blobs (stakeholders + metadata).
    pub fn blob_len(&self) -> usize {
        self.stakeholders.iter().map(Vec::len).sum::<usize>() + self.content_metadata.len()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stakeholder<'a> {
    entity: Entity<'a>,
    reward_proportion: u32,
    contribution_type: &'static str,
}

#[derive(Serialize)]
struct Entity<'a> {
    id: &'a Value,
    name: &'a Value,
}

/// Format `payload` into an ISCN record at `version`.
///
/// Pure: equal payloads give byte-identical records.
pub fn format_payload(payload: &ContentPayload, version: u64) -> PayloadResult<FormattedRecord> {
    let content_fingerprints = match (&payload.hashes, &payload.hash) {
        (Some(hashes), _) if !hashes.is_empty() => hashes.clone(),
        (_, Some(hash)) if !hash.is_empty() => vec![hash.clone()],
        _ => return Err(PayloadError::MissingFingerprint),
    };

    let mut stakeholders = Vec::with_capacity(1);
    if let Some(author) = payload.author.as_ref().filter(|a| is_truthy(a)) {
        stakeholders.push(to_canonical_vec(&Stakeholder {
            entity: Entity {
                id: author,
                name: author,
            },
            reward_proportion: 1,
            contribution_type: AUTHOR_CONTRIBUTION_TYPE,
        })?);
    }

    Ok(FormattedRecord {
        record_notes: String::new(),
        content_fingerprints,
        stakeholders,
        content_metadata: to_canonical_vec(&content_metadata(payload, version))?,
    })
}

fn content_metadata(payload: &ContentPayload, version: u64) -> Value {
    let mut metadata = payload.fields.clone();
    metadata.insert("@context".into(), Value::from(SCHEMA_ORG_CONTEXT));
    let content_type = payload
        .content_type
        .clone()
        .filter(is_truthy)
        .unwrap_or_else(|| Value::from(DEFAULT_CONTENT_TYPE));
    metadata.insert("@type".into(), content_type);
    metadata.insert("version".into(), Value::from(version));

    let optional = [
        ("title", &payload.title),
        ("author", &payload.author),
        ("description", &payload.description),
        ("url", &payload.url),
    ];
    for (key, value) in optional {
        match value {
            Some(v) => metadata.insert(key.into(), v.clone()),
            None => metadata.remove(key),
        };
    }
    Value::Object(metadata)
}
