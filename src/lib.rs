//! ISCN record registration library.
//!
//! Formats content metadata into ISCN records, estimates gas and
//! registration fees, and sequences signing and broadcasting against the
//! signer's chain account state.

pub mod config;
pub mod iscn;
pub mod fees;
pub mod blockchain;
pub mod observability;

pub use blockchain::{AccountState, BlockchainError, IscnRegistrar};
pub use config::schema::RegistrarConfig;
pub use fees::{FeeQuoter, GasEstimate, GasModel};
pub use iscn::{format_payload, parse_tx_result, ContentPayload, FormattedRecord, IscnTxInput, TxResult};
