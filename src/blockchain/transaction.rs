//! ISCN transaction building, signing and broadcasting.
//!
//! # Responsibilities
//! - Pick create vs. update from the presence of an ISCN id
//! - Estimate the fee over the fully shaped message
//! - Sign (optionally with caller-allocated signer data) and broadcast
//! - Reject failed broadcasts and parse the minted record id

use prost::Message;
use std::sync::Arc;

use crate::blockchain::account::AccountState;
use crate::blockchain::types::{BlockchainError, BlockchainResult, BroadcastReceipt, SignerData};
use crate::fees::GasModel;
use crate::iscn::{format_payload, parse_tx_result, IscnMessage, IscnTxInput, TxResult};
use crate::observability::metrics;

/// Record version written by `submit`.
pub const SUBMIT_RECORD_VERSION: u64 = 1;

/// Builds, signs and broadcasts ISCN transactions for one signer.
#[derive(Clone)]
pub struct IscnRegistrar {
    accounts: Arc<AccountState>,
    gas: GasModel,
}

impl IscnRegistrar {
    pub fn new(accounts: Arc<AccountState>, gas: GasModel) -> Self {
        Self { accounts, gas }
    }

    /// Register or update an ISCN record.
    ///
    /// `explicit_signer_data` bypasses the chain's sequence lookup, so callers
    /// with several transactions in flight can allocate sequences themselves.
    pub async fn submit(
        &self,
        input: &IscnTxInput,
        explicit_signer_data: Option<SignerData>,
    ) -> BlockchainResult<TxResult> {
        let identity = self.accounts.resolve_identity().await?;
        let record = format_payload(&input.payload, SUBMIT_RECORD_VERSION)?;
        let client = self.accounts.signing_client().await?;

        let message = IscnMessage::new(identity.address(), input.iscn_id.clone(), record);
        let kind = message.kind();
        let fee = self.gas.estimate(&message)?;

        tracing::debug!(
            kind,
            iscn_id = ?message.iscn_id(),
            gas = %fee.gas,
            explicit_sequence = ?explicit_signer_data.as_ref().map(|d| d.sequence),
            "Signing ISCN transaction"
        );

        let result = async {
            let tx_raw = client
                .sign(
                    identity.address(),
                    std::slice::from_ref(&message),
                    &fee,
                    "",
                    explicit_signer_data.as_ref(),
                )
                .await?;
            let receipt = client.broadcast_tx(&tx_raw.encode_to_vec()).await?;
            assert_broadcast_success(&receipt)?;
            Ok::<_, BlockchainError>(parse_tx_result(&receipt))
        }
        .await;

        match &result {
            Ok(tx) => tracing::info!(
                kind,
                tx_hash = %tx.tx_hash,
                iscn_id = ?tx.iscn_id,
                "ISCN transaction broadcast"
            ),
            Err(e) => tracing::warn!(kind, error = %e, "ISCN transaction failed"),
        }
        metrics::record_tx_submitted(kind, result.is_ok());
        result
    }

    /// Gas model used for fees.
    pub fn gas_model(&self) -> &GasModel {
        &self.gas
    }

    pub fn accounts(&self) -> &Arc<AccountState> {
        &self.accounts
    }
}

/// Fail on a non-zero broadcast code.
pub fn assert_broadcast_success(receipt: &BroadcastReceipt) -> BlockchainResult<()> {
    if receipt.is_success() {
        return Ok(());
    }
    Err(BlockchainError::ChainRejected {
        tx_hash: receipt.transaction_hash.clone(),
        code: receipt.code,
        raw_log: receipt.raw_log.clone().unwrap_or_default(),
    })
}
