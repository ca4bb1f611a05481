//! Fee estimation subsystem.
//!
//! # Data Flow
//! ```text
//! IscnMessage
//!     → gas.rs (canonical byte length → linear gas model → gas + fee)
//!
//! ContentPayload
//!     → quote.rs (format record, build ISCN envelope, measure bytes)
//!     → oracle.rs (fee per byte from the chain's ISCN params)
//!     → registration fee
//! ```
//!
//! # Design Decisions
//! - Exact decimal arithmetic; results are rounded up to whole units
//! - Model constants come from configuration, defaults are the fitted values
//! - Oracle failures are returned to the caller, never retried

pub mod gas;
pub mod oracle;
pub mod quote;
pub mod types;

pub use gas::GasModel;
pub use oracle::{FeeOracle, HttpFeeOracle};
pub use quote::{FeeQuoteOptions, FeeQuoter};
pub use types::{Coin, FeeError, FeeResult, GasEstimate};
