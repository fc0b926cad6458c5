use credo_store::StoreError;
use credo_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("cannot endorse yourself")]
    SelfEndorsement,

    #[error("endorsement must carry a non-zero payment")]
    ZeroPayment,

    #[error("endorsement must award at least one point")]
    ZeroPoints,

    #[error("message is {len} bytes, limit is {max}")]
    MessageTooLong { len: usize, max: usize },

    #[error("reputation overflow: {current} + {points} exceeds u64")]
    ReputationOverflow { current: u64, points: u64 },

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfEndorsement | Self::ZeroPayment | Self::ZeroPoints | Self::MessageTooLong { .. } => {
                ErrorKind::InputViolation
            }
            Self::ReputationOverflow { .. } => ErrorKind::InvariantGuard,
            Self::InsufficientFunds { .. } | Self::Store(_) => ErrorKind::Environment,
        }
    }
}
