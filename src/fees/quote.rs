//! Registration fee quoting.
//!
//! The chain charges a per-byte fee on the stored ISCN record. The stored
//! form is a JSON-LD envelope around the record fields, with stakeholders and
//! metadata kept as separate blobs, so the billable size is the envelope plus
//! those blobs.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::fees::oracle::FeeOracle;
use crate::fees::types::{FeeError, FeeResult};
use crate::iscn::payload::{format_payload, ContentPayload, FormattedRecord};
use crate::observability::metrics;

/// Record id used to size the envelope before the real id exists.
pub const PLACEHOLDER_RECORD_PATH: &str = "btC7CJvMm4WLj9Tau9LAPTfGK7sfymTJW7ORcFdruCU/1";

/// Parent CID used to size a version > 1 envelope when none is supplied.
pub const PLACEHOLDER_PARENT_CID: &str =
    "bahuaierav3bfvm4ytx7gvn4yqeu4piiocuvtvdpyyb5f6moxniwemae4tjyq";

/// Options for a fee quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuoteOptions {
    /// Record version being registered.
    pub version: u64,
    /// CID of the previous version; only read when `version > 1`.
    pub parent_link: Option<String>,
}

impl Default for FeeQuoteOptions {
    fn default() -> Self {
        Self {
            version: 1,
            parent_link: None,
        }
    }
}

/// Quotes registration fees against a fee oracle.
#[derive(Clone)]
pub struct FeeQuoter {
    oracle: Arc<dyn FeeOracle>,
    registry_name: String,
}

impl FeeQuoter {
    pub fn new(oracle: Arc<dyn FeeOracle>, registry_name: impl Into<String>) -> Self {
        Self {
            oracle,
            registry_name: registry_name.into(),
        }
    }

    /// Registration fee, in the smallest unit, for storing `payload`.
    pub async fn estimate_fee(
        &self,
        payload: &ContentPayload,
        options: &FeeQuoteOptions,
    ) -> FeeResult<u64> {
        let record = format_payload(payload, options.version)?;
        let fee_per_byte = self.oracle.query_fee_per_byte().await?;
        let byte_size = billable_size(&record, &self.registry_name, options, Utc::now())?;

        let fee = Decimal::from(byte_size as u64)
            .checked_mul(fee_per_byte)
            .ok_or(FeeError::Overflow)?
            .ceil()
            .to_u64()
            .ok_or(FeeError::Overflow)?;

        tracing::debug!(
            byte_size,
            fee_per_byte = %fee_per_byte,
            fee,
            version = options.version,
            "Registration fee quoted"
        );
        metrics::record_fee_quote(fee);
        Ok(fee)
    }

    pub fn registry_name(&self) -> &str {
        &self.registry_name
    }
}

impl std::fmt::Debug for FeeQuoter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeQuoter")
            .field("registry_name", &self.registry_name)
            .finish()
    }
}

/// The JSON-LD record envelope as stored on chain.
pub fn record_envelope(
    record: &FormattedRecord,
    registry_name: &str,
    options: &FeeQuoteOptions,
    timestamp: DateTime<Utc>,
) -> Value {
    let parent = if options.version > 1 {
        let cid = options
            .parent_link
            .as_deref()
            .unwrap_or(PLACEHOLDER_PARENT_CID);
        json!({ "/": cid })
    } else {
        json!({})
    };

    json!({
        "@context": {
            "@vocab": "http://iscn.io/",
            "recordParentIPLD": {
                "@container": "@index",
            },
            "stakeholders": {
                "@context": {
                    "@vocab": "http://schema.org/",
                    "entity": "http://iscn.io/entity",
                    "rewardProportion": "http://iscn.io/rewardProportion",
                    "contributionType": "http://iscn.io/contributionType",
                    "footprint": "http://iscn.io/footprint",
                },
            },
            "contentMetadata": {
                "@context": null,
            },
        },
        "@type": "Record",
        "@id": format!("iscn://{}/{}", registry_name, PLACEHOLDER_RECORD_PATH),
        "recordTimestamp": timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        "recordVersion": options.version,
        "recordNotes": record.record_notes,
        "contentFingerprints": record.content_fingerprints,
        "recordParentIPLD": parent,
    })
}

/// Envelope bytes plus stakeholder and metadata blob bytes.
///
/// The envelope carries the fingerprints inline; the blobs are stored
/// separately and counted once each.
pub fn billable_size(
    record: &FormattedRecord,
    registry_name: &str,
    options: &FeeQuoteOptions,
    timestamp: DateTime<Utc>,
) -> FeeResult<usize> {
    let envelope = record_envelope(record, registry_name, options, timestamp);
    let envelope_len = serde_json::to_vec(&envelope)?.len();
    Ok(envelope_len + record.blob_len())
}
