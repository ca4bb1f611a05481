//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and histograms via the `metrics` facade)
//!
//! Consumers:
//!     → stderr subscriber installed by the binary
//!     → whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; installing subscribers/recorders is the
//!   binary's job
//! - Secrets never appear in fields

pub mod logging;
pub mod metrics;
