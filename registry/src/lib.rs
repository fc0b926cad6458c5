//! Credential registry — soulbound credentials, at most one per participant.
//!
//! A participant becomes eligible in one of two ways:
//! - aggregate reputation from the endorsement ledger reaches the threshold, or
//! - a zero-knowledge proof of eligibility verifies against the registry's
//!   expected public input.
//!
//! Either path ends in the same terminal state. Issued credentials never move:
//! every transfer and approval entry point fails unconditionally.

pub mod config;
pub mod error;
pub mod registry;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::CredentialRegistry;
