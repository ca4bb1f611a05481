//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs
//! - Validate value ranges (timeouts > 0, gas price > 0, non-negative model)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RegistrarConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use rust_decimal::Decimal;
use std::fmt;

use crate::config::schema::RegistrarConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RegistrarConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "chain.rpc_url", &config.chain.rpc_url);
    check_url(&mut errors, "fee_oracle.lcd_url", &config.fee_oracle.lcd_url);

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.fee_oracle.timeout_secs == 0 {
        errors.push(ValidationError::new("fee_oracle.timeout_secs", "must be greater than 0"));
    }
    if config.chain.registry_name.trim().is_empty() {
        errors.push(ValidationError::new("chain.registry_name", "must not be empty"));
    }
    if config.chain.denom.trim().is_empty() {
        errors.push(ValidationError::new("chain.denom", "must not be empty"));
    }
    if config.signer.mnemonic_env.trim().is_empty() {
        errors.push(ValidationError::new("signer.mnemonic_env", "must not be empty"));
    }

    let gas = &config.gas;
    for (field, value) in [
        ("gas.slope", gas.slope),
        ("gas.intercept", gas.intercept),
        ("gas.buffer", gas.buffer),
    ] {
        if value.is_sign_negative() && !value.is_zero() {
            errors.push(ValidationError::new(field, "must not be negative"));
        }
    }
    if gas.gas_price <= Decimal::ZERO {
        errors.push(ValidationError::new("gas.gas_price", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https" | "ws" | "wss") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e))),
    }
}
