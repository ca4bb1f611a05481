//! Wallet collaborator interface and signer secret loading.
//!
//! # Security
//! - The mnemonic is loaded ONLY from an environment variable
//! - The mnemonic is never logged or serialized
//! - Key derivation and signing happen in the wallet implementation

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::blockchain::types::{AccountData, BlockchainError, BlockchainResult};

/// Default environment variable name for the signer mnemonic.
pub const MNEMONIC_ENV_VAR: &str = "ISCN_SIGNER_MNEMONIC";

/// HD wallet derived from a mnemonic.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Accounts held by this wallet; the first one signs.
    async fn accounts(&self) -> BlockchainResult<Vec<AccountData>>;
}

/// Derives wallets from mnemonics.
#[async_trait]
pub trait WalletFactory: Send + Sync {
    async fn from_mnemonic(&self, mnemonic: &Mnemonic) -> BlockchainResult<Arc<dyn Wallet>>;
}

/// Signer secret. `Debug` never prints the phrase.
#[derive(Clone)]
pub struct Mnemonic(String);

impl Mnemonic {
    pub fn new(phrase: impl Into<String>) -> BlockchainResult<Self> {
        let phrase = phrase.into();
        let words = phrase.split_whitespace().count();
        if !matches!(words, 12 | 15 | 18 | 21 | 24) {
            return Err(BlockchainError::Wallet(format!(
                "Mnemonic must have 12, 15, 18, 21 or 24 words, got {}",
                words
            )));
        }
        Ok(Self(phrase.split_whitespace().collect::<Vec<_>>().join(" ")))
    }

    /// Load the mnemonic from environment variable `var`.
    pub fn from_env(var: &str) -> BlockchainResult<Self> {
        let phrase = std::env::var(var).map_err(|_| {
            BlockchainError::Wallet(format!("Environment variable {} not set", var))
        })?;
        Self::new(phrase)
    }

    pub fn phrase(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mnemonic(<redacted>)")
    }
}

/// The resolved signer: wallet handle plus its first account.
#[derive(Clone)]
pub struct SignerIdentity {
    pub wallet: Arc<dyn Wallet>,
    pub account: AccountData,
}

impl SignerIdentity {
    pub fn address(&self) -> &str {
        &self.account.address
    }
}

impl fmt::Debug for SignerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerIdentity")
            .field("address", &self.account.address)
            .finish()
    }
}
