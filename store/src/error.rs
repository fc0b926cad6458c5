use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("balance overflow for {0}")]
    BalanceOverflow(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}
