use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] credo_ledger::LedgerError),

    #[error("registry error: {0}")]
    Registry(#[from] credo_registry::RegistryError),

    #[error("verification error: {0}")]
    Verification(#[from] credo_verification::VerificationError),

    #[error("store error: {0}")]
    Store(#[from] credo_store::StoreError),

    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("no verification key configured and no proof verifier supplied")]
    MissingVerifier,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
