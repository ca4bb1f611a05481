//! Protobuf wire types.
//!
//! Mirrors `likechain.iscn` tx messages and the cosmos `TxRaw` envelope.

use crate::iscn::payload::FormattedRecord;

#[derive(Clone, PartialEq, prost::Message)]
pub struct IscnRecord {
    #[prost(string, tag = "1")]
    pub record_notes: String,
    #[prost(string, repeated, tag = "2")]
    pub content_fingerprints: Vec<String>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub stakeholders: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "4")]
    pub content_metadata: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgCreateIscnRecord {
    #[prost(string, tag = "1")]
    pub from: String,
    #[prost(message, optional, tag = "2")]
    pub record: Option<IscnRecord>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgUpdateIscnRecord {
    #[prost(string, tag = "1")]
    pub from: String,
    #[prost(string, tag = "2")]
    pub iscn_id: String,
    #[prost(message, optional, tag = "3")]
    pub record: Option<IscnRecord>,
}

/// `google.protobuf.Any`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Any {
    #[prost(string, tag = "1")]
    pub type_url: String,
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

/// `cosmos.tx.v1beta1.TxRaw`, the signed transaction as broadcast.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TxRaw {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub auth_info_bytes: Vec<u8>,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub signatures: Vec<Vec<u8>>,
}

impl From<&FormattedRecord> for IscnRecord {
    fn from(record: &FormattedRecord) -> Self {
        Self {
            record_notes: record.record_notes.clone(),
            content_fingerprints: record.content_fingerprints.clone(),
            stakeholders: record.stakeholders.clone(),
            content_metadata: record.content_metadata.clone(),
        }
    }
}
