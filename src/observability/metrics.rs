//! Metrics collection.
//!
//! # Metrics
//! - `iscn_tx_submitted_total` (counter): submissions by kind, outcome
//! - `iscn_gas_estimate` (histogram): estimated gas per message
//! - `iscn_message_bytes` (histogram): canonical message size
//! - `iscn_fee_quote` (histogram): quoted registration fees
//! - `iscn_oracle_queries_total` (counter): fee oracle queries by outcome
//!
//! Recording is a no-op until a recorder is installed.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn metric recording on or off process-wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

fn outcome(ok: bool) -> &'static str {
    if ok {
        "success"
    } else {
        "failure"
    }
}

pub fn record_tx_submitted(kind: &'static str, ok: bool) {
    if !enabled() {
        return;
    }
    metrics::counter!("iscn_tx_submitted_total", "kind" => kind, "outcome" => outcome(ok))
        .increment(1);
}

pub fn record_gas_estimate(byte_len: usize, gas: &Decimal) {
    if !enabled() {
        return;
    }
    metrics::histogram!("iscn_message_bytes").record(byte_len as f64);
    metrics::histogram!("iscn_gas_estimate").record(gas.to_f64().unwrap_or_default());
}

pub fn record_fee_quote(fee: u64) {
    if !enabled() {
        return;
    }
    metrics::histogram!("iscn_fee_quote").record(fee as f64);
}

pub fn record_oracle_query(ok: bool) {
    if !enabled() {
        return;
    }
    metrics::counter!("iscn_oracle_queries_total", "outcome" => outcome(ok)).increment(1);
}
