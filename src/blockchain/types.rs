//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::config::schema::ChainConfig;

use crate::iscn::PayloadError;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Mnemonic missing or wallet derivation failed.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The chain rejected the broadcast transaction.
    #[error("Transaction {tx_hash} rejected with code {code}: {raw_log}")]
    ChainRejected {
        tx_hash: String,
        code: u32,
        raw_log: String,
    },

    /// Message type missing from the registry.
    #[error("Unregistered message type: {0}")]
    UnregisteredType(String),

    /// Payload could not be formatted into a record.
    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),

    /// Message could not be serialized for gas estimation.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// An account held by a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    /// Bech32 address, e.g. `like1...`.
    pub address: String,
    pub algo: String,
    pub pubkey: Vec<u8>,
}

/// Account number and next sequence as reported by the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceResponse {
    pub account_number: u64,
    pub sequence: u64,
}

/// Signer data used instead of a chain lookup when supplied to `sign`.
///
/// Lets a caller pre-allocate sequences for several in-flight transactions
/// from the same account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerData {
    pub account_number: u64,
    pub sequence: u64,
    pub chain_id: String,
}

/// Result of `broadcast_tx`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastReceipt {
    pub height: u64,
    /// 0 on success.
    pub code: u32,
    pub transaction_hash: String,
    #[serde(default)]
    pub raw_log: Option<String>,
    pub gas_used: u64,
    pub gas_wanted: u64,
}

impl BroadcastReceipt {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}
