//! Linear gas model.
//!
//! Gas used by ISCN transactions grows linearly with message size. The
//! default constants come from a regression of historical gas usage against
//! the canonical JSON size of the message; refit them against the target
//! chain before changing the defaults.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::schema::GasConfig;
use crate::fees::types::{Coin, GasEstimate};
use crate::iscn::codec::to_canonical_vec;
use crate::observability::metrics;

/// Gas per message byte.
pub fn default_slope() -> Decimal {
    Decimal::new(358, 2)
}

/// Fixed gas of an ISCN message.
pub fn default_intercept() -> Decimal {
    Decimal::new(9_944_387, 2)
}

/// Safety margin added on top of the fitted line.
pub fn default_buffer() -> Decimal {
    Decimal::from(50_000u64)
}

/// Fee units paid per unit of gas.
pub fn default_gas_price() -> Decimal {
    Decimal::from(10u64)
}

/// `gas = ceil(bytes * slope + intercept + buffer)`,
/// `fee = ceil(gas * gas_price)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GasModel {
    pub slope: Decimal,
    pub intercept: Decimal,
    pub buffer: Decimal,
    pub gas_price: Decimal,
    pub denom: String,
}

impl Default for GasModel {
    fn default() -> Self {
        Self {
            slope: default_slope(),
            intercept: default_intercept(),
            buffer: default_buffer(),
            gas_price: default_gas_price(),
            denom: "nanolike".to_string(),
        }
    }
}

impl GasModel {
    pub fn from_config(config: &GasConfig, denom: &str) -> Self {
        Self {
            slope: config.slope,
            intercept: config.intercept,
            buffer: config.buffer,
            gas_price: config.gas_price,
            denom: denom.to_string(),
        }
    }

    /// Estimate gas and fee for `message`, measured as canonical JSON.
    pub fn estimate<T: Serialize + ?Sized>(&self, message: &T) -> serde_json::Result<GasEstimate> {
        let bytes = to_canonical_vec(message)?;
        Ok(self.estimate_for_len(bytes.len()))
    }

    /// Estimate gas and fee for a message of `byte_len` bytes.
    pub fn estimate_for_len(&self, byte_len: usize) -> GasEstimate {
        let gas = Decimal::from(byte_len as u64)
            .saturating_mul(self.slope)
            .saturating_add(self.intercept)
            .saturating_add(self.buffer)
            .ceil();
        let fee = gas.saturating_mul(self.gas_price).ceil();

        tracing::debug!(byte_len, gas = %gas, fee = %fee, "Gas estimated");
        metrics::record_gas_estimate(byte_len, &gas);

        GasEstimate {
            amount: vec![Coin {
                amount: fee.normalize().to_string(),
                denom: self.denom.clone(),
            }],
            gas: gas.normalize().to_string(),
        }
    }
}
