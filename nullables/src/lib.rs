//! Nullable infrastructure for deterministic testing.
//!
//! The external capabilities the core depends on (proof verification, the
//! state backend) sit behind traits. This crate provides test-friendly
//! implementations that:
//! - Return scripted, deterministic answers
//! - Record how they were called
//! - Can inject failures on demand
//!
//! Usage: swap real implementations for nullables in tests.

pub mod store;
pub mod verifier;

pub use store::FailingStore;
pub use verifier::NullProofVerifier;
