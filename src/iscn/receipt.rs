//! Broadcast receipt parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::types::BroadcastReceipt;

/// Event type emitted when a record is created or updated.
pub const ISCN_RECORD_EVENT: &str = "iscn_record";

/// Outcome of a successful ISCN transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxResult {
    pub tx_hash: String,
    /// Record id exactly as emitted by the chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iscn_id: Option<String>,
}

/// Extract the tx hash and minted ISCN id from `receipt`.
///
/// Never fails: any unexpected log shape leaves `iscn_id` empty.
pub fn parse_tx_result(receipt: &BroadcastReceipt) -> TxResult {
    let iscn_id = receipt.raw_log.as_deref().and_then(iscn_id_from_raw_log);
    if receipt.raw_log.is_some() && iscn_id.is_none() {
        tracing::debug!(tx_hash = %receipt.transaction_hash, "No iscn_record event in raw log");
    }
    TxResult {
        tx_hash: receipt.transaction_hash.clone(),
        iscn_id,
    }
}

fn iscn_id_from_raw_log(raw_log: &str) -> Option<String> {
    let logs: Value = serde_json::from_str(raw_log).ok()?;
    logs.get(0)?
        .get("events")?
        .as_array()?
        .iter()
        .find(|event| event.get("type").and_then(Value::as_str) == Some(ISCN_RECORD_EVENT))?
        .get("attributes")?
        .get(0)?
        .get("value")?
        .as_str()
        .map(str::to_owned)
}
