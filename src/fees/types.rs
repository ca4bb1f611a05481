//! Fee estimation types and errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::iscn::PayloadError;

/// Errors raised while quoting fees.
#[derive(Debug, Error)]
pub enum FeeError {
    /// Fee oracle unreachable or returned an unusable answer.
    #[error("Fee oracle error: {0}")]
    Oracle(String),

    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Computed fee does not fit in a u64.
    #[error("Fee amount overflow")]
    Overflow,
}

/// Result type for fee operations.
pub type FeeResult<T> = Result<T, FeeError>;

/// An amount of one denomination, integer-valued, string-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub amount: String,
    pub denom: String,
}

/// Transaction fee: gas limit plus the amount paid for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasEstimate {
    pub amount: Vec<Coin>,
    pub gas: String,
}

impl GasEstimate {
    /// Gas limit as a number.
    pub fn gas_limit(&self) -> Option<u64> {
        self.gas.parse().ok()
    }
}
