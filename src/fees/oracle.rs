//! Fee-per-byte oracle.
//!
//! # Responsibilities
//! - Provide the current ISCN registration fee rate
//! - Query the chain's LCD endpoint for `params.fee_per_byte`
//!
//! A failed query fails the quote; there is no retry here.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::config::schema::FeeOracleConfig;
use crate::fees::types::{FeeError, FeeResult};
use crate::observability::metrics;

/// Path of the ISCN params query on the LCD endpoint.
pub const ISCN_PARAMS_PATH: &str = "/likechain/iscn/params";

/// Source of the per-byte registration fee.
#[async_trait]
pub trait FeeOracle: Send + Sync {
    async fn query_fee_per_byte(&self) -> FeeResult<Decimal>;
}

#[derive(Debug, Deserialize)]
struct ParamsResponse {
    params: IscnParams,
}

#[derive(Debug, Deserialize)]
struct IscnParams {
    fee_per_byte: DecCoin,
}

#[derive(Debug, Deserialize)]
struct DecCoin {
    #[allow(dead_code)]
    denom: String,
    amount: String,
}

/// Oracle backed by the chain's REST (LCD) API.
#[derive(Debug, Clone)]
pub struct HttpFeeOracle {
    client: Client,
    params_url: String,
}

impl HttpFeeOracle {
    pub fn new(config: &FeeOracleConfig) -> FeeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeeError::Oracle(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            params_url: format!("{}{}", config.lcd_url.trim_end_matches('/'), ISCN_PARAMS_PATH),
        })
    }

    pub fn params_url(&self) -> &str {
        &self.params_url
    }

    async fn fetch(&self) -> FeeResult<Decimal> {
        let res = self
            .client
            .get(&self.params_url)
            .send()
            .await
            .map_err(|e| FeeError::Oracle(format!("Request to {} failed: {}", self.params_url, e)))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(FeeError::Oracle(format!(
                "LCD returned status {}: {}",
                status, body
            )));
        }

        let params: ParamsResponse = res
            .json()
            .await
            .map_err(|e| FeeError::Oracle(format!("Malformed params response: {}", e)))?;

        parse_fee_per_byte(&params.params.fee_per_byte.amount)
    }
}

/// Parse the chain's `fee_per_byte` decimal string. Negative rates are rejected.
fn parse_fee_per_byte(amount: &str) -> FeeResult<Decimal> {
    let rate = Decimal::from_str(amount)
        .map_err(|e| FeeError::Oracle(format!("Invalid fee_per_byte '{}': {}", amount, e)))?;
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(FeeError::Oracle(format!("Negative fee_per_byte '{}'", amount)));
    }
    Ok(rate)
}

#[async_trait]
impl FeeOracle for HttpFeeOracle {
    async fn query_fee_per_byte(&self) -> FeeResult<Decimal> {
        let result = self.fetch().await;
        match &result {
            Ok(rate) => tracing::debug!(fee_per_byte = %rate, "Fee per byte queried"),
            Err(e) => tracing::warn!(error = %e, url = %self.params_url, "Fee per byte query failed"),
        }
        metrics::record_oracle_query(result.is_ok());
        result
    }
}
