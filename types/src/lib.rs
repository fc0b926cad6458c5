//! Fundamental types for Credo.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! participant identities, value amounts, endorsement records, credential state,
//! registry parameters, and the error taxonomy every component reports into.

pub mod address;
pub mod amount;
pub mod credential;
pub mod endorsement;
pub mod error;
pub mod params;

pub use address::Participant;
pub use amount::Value;
pub use credential::{Credential, CredentialState, IssuancePath, TokenId};
pub use endorsement::Endorsement;
pub use error::{ErrorKind, TypesError};
pub use params::{LedgerParams, DEFAULT_MAX_MESSAGE_LEN, DEFAULT_THRESHOLD};
