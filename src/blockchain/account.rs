//! Signer identity and account state.
//!
//! # Responsibilities
//! - Derive the signer identity once, on first use
//! - Connect the signing client once, on first use
//! - Query sequence, account number and chain id for the signer
//!
//! # Design Decisions
//! - One `AccountState` per process, shared by `Arc`
//! - Each lazy value sits behind a `tokio::sync::OnceCell`: concurrent first
//!   callers wait on a single initialization, and a failed attempt leaves the
//!   cell empty so the next call retries

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::blockchain::client::{Connector, RpcEndpoint, SigningClient};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainConfig, SignerData};
use crate::blockchain::wallet::{Mnemonic, SignerIdentity, WalletFactory};
use crate::config::schema::RegistrarConfig;
use crate::iscn::Registry;

pub struct AccountState {
    endpoint: RpcEndpoint,
    mnemonic: Mnemonic,
    wallets: Arc<dyn WalletFactory>,
    connector: Arc<dyn Connector>,
    registry: Arc<Registry>,
    identity: OnceCell<Arc<SignerIdentity>>,
    client: OnceCell<Arc<dyn SigningClient>>,
}

impl AccountState {
    /// Create the account state. Nothing is derived or connected yet.
    pub fn new(
        config: &ChainConfig,
        mnemonic: Mnemonic,
        wallets: Arc<dyn WalletFactory>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        Self {
            endpoint: RpcEndpoint::from(config),
            mnemonic,
            wallets,
            connector,
            registry: Arc::new(Registry::with_iscn_types()),
            identity: OnceCell::new(),
            client: OnceCell::new(),
        }
    }

    /// Create the account state from configuration, reading the mnemonic
    /// from the configured environment variable.
    pub fn from_config(
        config: &RegistrarConfig,
        wallets: Arc<dyn WalletFactory>,
        connector: Arc<dyn Connector>,
    ) -> BlockchainResult<Self> {
        let mnemonic = Mnemonic::from_env(&config.signer.mnemonic_env)?;
        Ok(Self::new(&config.chain, mnemonic, wallets, connector))
    }

    /// Resolve the signer identity, deriving the wallet on first call.
    pub async fn resolve_identity(&self) -> BlockchainResult<Arc<SignerIdentity>> {
        let wallets = self.wallets.clone();
        let mnemonic = &self.mnemonic;
        self.identity
            .get_or_try_init(|| async move {
                let wallet = wallets.from_mnemonic(mnemonic).await?;
                let account = wallet
                    .accounts()
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| BlockchainError::Wallet("Wallet has no accounts".to_string()))?;

                tracing::info!(address = %account.address, "Signer identity resolved");
                Ok::<_, BlockchainError>(Arc::new(SignerIdentity { wallet, account }))
            })
            .await
            .cloned()
    }

    /// The signing client, connected on first call.
    pub async fn signing_client(&self) -> BlockchainResult<Arc<dyn SigningClient>> {
        if let Some(client) = self.client.get() {
            return Ok(client.clone());
        }
        let identity = self.resolve_identity().await?;
        let connector = self.connector.clone();
        let registry = self.registry.clone();
        let endpoint = &self.endpoint;
        self.client
            .get_or_try_init(|| async move {
                let client = connector
                    .connect_with_signer(endpoint, identity.wallet.clone(), registry)
                    .await?;
                tracing::info!(rpc_url = %endpoint.url, "Signing client connected");
                Ok::<_, BlockchainError>(client)
            })
            .await
            .cloned()
    }

    /// Next sequence number of the signer account.
    pub async fn get_sequence(&self) -> BlockchainResult<u64> {
        let identity = self.resolve_identity().await?;
        let client = self.signing_client().await?;
        let response = client.get_sequence(identity.address()).await?;
        Ok(response.sequence)
    }

    /// Account number, sequence and chain id, ready to pass as explicit
    /// signer data.
    pub async fn get_signer_data(&self) -> BlockchainResult<SignerData> {
        let identity = self.resolve_identity().await?;
        let client = self.signing_client().await?;
        let response = client.get_sequence(identity.address()).await?;
        let chain_id = client.get_chain_id().await?;
        Ok(SignerData {
            account_number: response.account_number,
            sequence: response.sequence,
            chain_id,
        })
    }

    /// Whether the identity has been resolved.
    pub fn is_identity_resolved(&self) -> bool {
        self.identity.initialized()
    }

    /// Whether the signing client has been connected.
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    pub fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }
}

impl std::fmt::Debug for AccountState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountState")
            .field("rpc_url", &self.endpoint.url)
            .field("identity", &self.identity.get())
            .field("connected", &self.client.initialized())
            .finish()
    }
}
