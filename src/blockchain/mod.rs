//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variable (mnemonic), RPC URL
//!     → wallet.rs (signer secret, wallet collaborator)
//!     → client.rs (signing client collaborator)
//!     → account.rs (lazy identity + client, sequence queries)
//!     → transaction.rs (build, fee, sign, broadcast, parse)
//! ```
//!
//! # Security Constraints
//! - Mnemonic ONLY from environment variables
//! - Never log the mnemonic or key material
//! - Signature scheme and node transport live behind the collaborator traits

pub mod account;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use account::AccountState;
pub use client::{Connector, RpcEndpoint, SigningClient};
pub use transaction::{assert_broadcast_success, IscnRegistrar};
pub use types::{
    AccountData, BlockchainError, BlockchainResult, BroadcastReceipt, ChainConfig,
    SequenceResponse, SignerData,
};
pub use wallet::{Mnemonic, SignerIdentity, Wallet, WalletFactory};
