//! ISCN record subsystem.
//!
//! # Data Flow
//! ```text
//! ContentPayload (arbitrary JSON object)
//!     → payload.rs (fingerprints, stakeholders, metadata blob)
//!     → message.rs (MsgCreateIscnRecord / MsgUpdateIscnRecord)
//!     → registry.rs + proto.rs (protobuf Any for the signing client)
//!
//! BroadcastReceipt
//!     → receipt.rs (tx hash + minted ISCN id)
//! ```
//!
//! # Design Decisions
//! - All JSON blobs use sorted keys (codec.rs) so equal input gives equal bytes
//! - Missing fingerprints are rejected here rather than by the chain

pub mod codec;
pub mod message;
pub mod payload;
pub mod proto;
pub mod receipt;
pub mod registry;

pub use message::{IscnMessage, MSG_CREATE_ISCN_RECORD, MSG_UPDATE_ISCN_RECORD};
pub use payload::{format_payload, ContentPayload, FormattedRecord, IscnTxInput, PayloadError};
pub use receipt::{parse_tx_result, TxResult, ISCN_RECORD_EVENT};
pub use registry::{EncodeObject, Registry};

/// Registry name of the LikeCoin chain ISCN registry.
pub const ISCN_REGISTRY_NAME: &str = "likecoin-chain";
