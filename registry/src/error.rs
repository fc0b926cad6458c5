use credo_ledger::LedgerError;
use credo_store::StoreError;
use credo_types::{ErrorKind, Participant, TokenId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{owner} already holds credential {token_id}")]
    AlreadyIssued { owner: Participant, token_id: TokenId },

    #[error("insufficient reputation: have {have}, need {need}")]
    InsufficientReputation { have: u64, need: u64 },

    #[error("eligibility proof did not verify")]
    InvalidProof,

    #[error("credentials are soulbound and cannot be transferred or approved")]
    Soulbound,

    #[error("token id space exhausted")]
    TokenIdsExhausted,

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyIssued { .. } => ErrorKind::StateConflict,
            Self::InsufficientReputation { .. } | Self::InvalidProof => ErrorKind::EligibilityFailure,
            Self::Soulbound => ErrorKind::PolicyDenial,
            Self::TokenIdsExhausted => ErrorKind::InvariantGuard,
            Self::Ledger(e) => e.kind(),
            Self::Store(_) => ErrorKind::Environment,
        }
    }
}
