//! Signing/broadcast collaborator interface.
//!
//! # Responsibilities
//! - Connect to the node RPC endpoint with a wallet and message registry
//! - Sign messages into a `TxRaw` (skipping the account lookup when signer
//!   data is supplied)
//! - Broadcast encoded transactions
//! - Query account sequence and chain id
//!
//! Retry and timeout policy belong to the implementation; the endpoint
//! timeout is passed through from configuration unchanged.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::types::{
    BlockchainResult, BroadcastReceipt, ChainConfig, SequenceResponse, SignerData,
};
use crate::blockchain::wallet::Wallet;
use crate::fees::GasEstimate;
use crate::iscn::proto::TxRaw;
use crate::iscn::{IscnMessage, Registry};

/// Node RPC endpoint a signing client is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcEndpoint {
    pub url: String,
    pub timeout: Duration,
}

impl From<&ChainConfig> for RpcEndpoint {
    fn from(config: &ChainConfig) -> Self {
        Self {
            url: config.rpc_url.clone(),
            timeout: Duration::from_secs(config.rpc_timeout_secs),
        }
    }
}

/// A connected client able to sign and broadcast for one wallet.
#[async_trait]
pub trait SigningClient: Send + Sync {
    /// Sign `messages` for `signer`.
    ///
    /// When `explicit_signer_data` is `Some`, its account number, sequence
    /// and chain id are used as-is and the chain is not queried.
    async fn sign(
        &self,
        signer: &str,
        messages: &[IscnMessage],
        fee: &GasEstimate,
        memo: &str,
        explicit_signer_data: Option<&SignerData>,
    ) -> BlockchainResult<TxRaw>;

    /// Broadcast protobuf-encoded `TxRaw` bytes.
    async fn broadcast_tx(&self, tx_bytes: &[u8]) -> BlockchainResult<BroadcastReceipt>;

    async fn get_sequence(&self, address: &str) -> BlockchainResult<SequenceResponse>;

    async fn get_chain_id(&self) -> BlockchainResult<String>;
}

/// Opens signing clients.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect_with_signer(
        &self,
        endpoint: &RpcEndpoint,
        wallet: Arc<dyn Wallet>,
        registry: Arc<Registry>,
    ) -> BlockchainResult<Arc<dyn SigningClient>>;
}
