//! Message type registry handed to the signing client.
//!
//! The signing client only encodes messages whose type URL is registered:
//! the chain defaults plus the two ISCN message types.

use std::collections::BTreeSet;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::iscn::message::{MSG_CREATE_ISCN_RECORD, MSG_UPDATE_ISCN_RECORD};
use crate::iscn::proto::Any;

/// A chain message that knows its type URL and protobuf encoding.
pub trait EncodeObject: Send + Sync {
    fn type_url(&self) -> &str;
    fn encode_value(&self) -> Vec<u8>;
}

/// Stargate default message types.
pub const DEFAULT_REGISTRY_TYPES: &[&str] = &[
    "/cosmos.base.v1beta1.Coin",
    "/cosmos.bank.v1beta1.MsgMultiSend",
    "/cosmos.bank.v1beta1.MsgSend",
    "/cosmos.distribution.v1beta1.MsgFundCommunityPool",
    "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress",
    "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward",
    "/cosmos.distribution.v1beta1.MsgWithdrawValidatorCommission",
    "/cosmos.gov.v1beta1.MsgDeposit",
    "/cosmos.gov.v1beta1.MsgSubmitProposal",
    "/cosmos.gov.v1beta1.MsgVote",
    "/cosmos.staking.v1beta1.MsgBeginRedelegate",
    "/cosmos.staking.v1beta1.MsgCreateValidator",
    "/cosmos.staking.v1beta1.MsgDelegate",
    "/cosmos.staking.v1beta1.MsgEditValidator",
    "/cosmos.staking.v1beta1.MsgUndelegate",
    "/ibc.applications.transfer.v1.MsgTransfer",
];

#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeSet<String>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain defaults plus ISCN create/update.
    pub fn with_iscn_types() -> Self {
        let mut registry = Self::new();
        for type_url in DEFAULT_REGISTRY_TYPES {
            registry.register(*type_url);
        }
        registry.register(MSG_CREATE_ISCN_RECORD);
        registry.register(MSG_UPDATE_ISCN_RECORD);
        registry
    }

    pub fn register(&mut self, type_url: impl Into<String>) {
        self.types.insert(type_url.into());
    }

    pub fn is_registered(&self, type_url: &str) -> bool {
        self.types.contains(type_url)
    }

    /// Wrap `message` in an `Any`, refusing unregistered types.
    pub fn encode(&self, message: &dyn EncodeObject) -> BlockchainResult<Any> {
        let type_url = message.type_url();
        if !self.is_registered(type_url) {
            return Err(BlockchainError::UnregisteredType(type_url.to_string()));
        }
        Ok(Any {
            type_url: type_url.to_string(),
            value: message.encode_value(),
        })
    }
}
