//! Credo runtime — composes the three core components over one shared store.
//!
//! The runtime is the environment-facing coordinator that:
//! - Loads configuration and the genesis value allocation
//! - Builds the endorsement ledger, proof verifier and credential registry
//! - Executes each incoming call as one atomic, sequenced unit
//! - Reports every call as a [`Receipt`] and fans events out to subscribers
//! - Records Prometheus metrics

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metrics;
pub mod runtime;

pub use config::{GenesisAllocation, NodeConfig};
pub use error::NodeError;
pub use event::{CredoEvent, EventBus};
pub use logging::{init_logging, LogFormat};
pub use metrics::NodeMetrics;
pub use runtime::{Call, Outcome, Receipt, Runtime};
