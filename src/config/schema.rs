//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! registrar. All types derive Serde traits for deserialization from config
//! files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::blockchain::wallet::MNEMONIC_ENV_VAR;
use crate::fees::gas::{default_buffer, default_gas_price, default_intercept, default_slope};
use crate::iscn::ISCN_REGISTRY_NAME;

/// Root configuration for the registrar.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RegistrarConfig {
    /// Chain endpoint and registry settings.
    pub chain: ChainConfig,

    /// Signing identity settings.
    pub signer: SignerConfig,

    /// Linear gas model constants.
    pub gas: GasConfig,

    /// Fee-per-byte oracle settings.
    pub fee_oracle: FeeOracleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Tendermint RPC endpoint URL.
    pub rpc_url: String,

    /// RPC request timeout in seconds, handed to the signing client.
    pub rpc_timeout_secs: u64,

    /// ISCN registry name (first segment of an ISCN id).
    pub registry_name: String,

    /// Smallest currency unit used for fees.
    pub denom: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:26657".to_string(),
            rpc_timeout_secs: 10,
            registry_name: ISCN_REGISTRY_NAME.to_string(),
            denom: "nanolike".to_string(),
        }
    }
}

/// Signer configuration. The mnemonic itself never lives in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Environment variable holding the mnemonic.
    pub mnemonic_env: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            mnemonic_env: MNEMONIC_ENV_VAR.to_string(),
        }
    }
}

/// Gas model constants, as decimal strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    /// Gas per canonical message byte.
    pub slope: Decimal,

    /// Fixed gas per message.
    pub intercept: Decimal,

    /// Extra gas added on top of the fitted line.
    pub buffer: Decimal,

    /// Fee units per gas unit.
    pub gas_price: Decimal,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            slope: default_slope(),
            intercept: default_intercept(),
            buffer: default_buffer(),
            gas_price: default_gas_price(),
        }
    }
}

/// Fee oracle (LCD) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeOracleConfig {
    /// LCD (REST) endpoint URL.
    pub lcd_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FeeOracleConfig {
    fn default() -> Self {
        Self {
            lcd_url: "http://localhost:1317".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "iscn_registrar=info".to_string(),
            metrics_enabled: true,
        }
    }
}
