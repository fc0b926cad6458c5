//! Error taxonomy shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification every component error maps into.
///
/// Receipts and metrics report failures by kind; the specific reason travels
/// alongside as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The caller supplied invalid arguments.
    InputViolation,
    /// The operation is invalid given current state.
    StateConflict,
    /// The caller does not currently qualify.
    EligibilityFailure,
    /// The operation would break an internal invariant.
    InvariantGuard,
    /// The operation is unconditionally disallowed.
    PolicyDenial,
    /// The execution environment failed (value transfer, storage backend).
    Environment,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputViolation => "input_violation",
            Self::StateConflict => "state_conflict",
            Self::EligibilityFailure => "eligibility_failure",
            Self::InvariantGuard => "invariant_guard",
            Self::PolicyDenial => "policy_denial",
            Self::Environment => "environment",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse errors for the primitive types in this crate.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid participant address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
