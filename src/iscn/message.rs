//! ISCN chain messages.
//!
//! A transaction carries exactly one of two shapes: create (no record id)
//! or update (record id of the latest version).

use prost::Message;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::iscn::payload::FormattedRecord;
use crate::iscn::proto;
use crate::iscn::registry::EncodeObject;

pub const MSG_CREATE_ISCN_RECORD: &str = "/likechain.iscn.MsgCreateIscnRecord";
pub const MSG_UPDATE_ISCN_RECORD: &str = "/likechain.iscn.MsgUpdateIscnRecord";

/// An ISCN create or update message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IscnMessage {
    Create {
        from: String,
        record: FormattedRecord,
    },
    Update {
        from: String,
        iscn_id: String,
        record: FormattedRecord,
    },
}

impl IscnMessage {
    /// Build the message for `record`; an ISCN id selects an update.
    pub fn new(from: impl Into<String>, iscn_id: Option<String>, record: FormattedRecord) -> Self {
        let from = from.into();
        match iscn_id.filter(|id| !id.is_empty()) {
            Some(iscn_id) => Self::Update {
                from,
                iscn_id,
                record,
            },
            None => Self::Create { from, record },
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update { .. })
    }

    pub fn from_address(&self) -> &str {
        match self {
            Self::Create { from, .. } | Self::Update { from, .. } => from,
        }
    }

    pub fn iscn_id(&self) -> Option<&str> {
        match self {
            Self::Create { .. } => None,
            Self::Update { iscn_id, .. } => Some(iscn_id),
        }
    }

    pub fn record(&self) -> &FormattedRecord {
        match self {
            Self::Create { record, .. } | Self::Update { record, .. } => record,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
        }
    }
}

impl EncodeObject for IscnMessage {
    fn type_url(&self) -> &str {
        match self {
            Self::Create { .. } => MSG_CREATE_ISCN_RECORD,
            Self::Update { .. } => MSG_UPDATE_ISCN_RECORD,
        }
    }

    fn encode_value(&self) -> Vec<u8> {
        match self {
            Self::Create { from, record } => proto::MsgCreateIscnRecord {
                from: from.clone(),
                record: Some(record.into()),
            }
            .encode_to_vec(),
            Self::Update {
                from,
                iscn_id,
                record,
            } => proto::MsgUpdateIscnRecord {
                from: from.clone(),
                iscn_id: iscn_id.clone(),
                record: Some(record.into()),
            }
            .encode_to_vec(),
        }
    }
}

/// `{"typeUrl": ..., "value": {"from": ..., "record": ..., "iscnId"?: ...}}`
impl Serialize for IscnMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EncodeObject", 2)?;
        state.serialize_field("typeUrl", self.type_url())?;
        state.serialize_field("value", &MessageValue(self))?;
        state.end()
    }
}

struct MessageValue<'a>(&'a IscnMessage);

impl Serialize for MessageValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let message = self.0;
        let len = if message.is_update() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("IscnMsgValue", len)?;
        state.serialize_field("from", message.from_address())?;
        state.serialize_field("record", message.record())?;
        if let Some(iscn_id) = message.iscn_id() {
            state.serialize_field("iscnId", iscn_id)?;
        }
        state.end()
    }
}
