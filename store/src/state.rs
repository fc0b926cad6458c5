//! Read, write and transaction traits over the ledger-resident state.

use credo_types::{Credential, Endorsement, Participant, TokenId, Value};

use crate::StoreError;

/// Read access to ledger state.
///
/// Inside a transaction, reads observe the transaction's own staged writes.
pub trait StateRead {
    /// Aggregate reputation of a participant (0 if never endorsed).
    fn reputation(&self, participant: &Participant) -> Result<u64, StoreError>;

    /// All endorsements received by a participant, in insertion order.
    fn endorsements(&self, participant: &Participant) -> Result<Vec<Endorsement>, StoreError>;

    /// Number of endorsements received by a participant.
    fn endorsement_count(&self, participant: &Participant) -> Result<u64, StoreError>;

    /// Spendable value held by a participant.
    fn balance(&self, participant: &Participant) -> Result<Value, StoreError>;

    /// The credential held by a participant, if any.
    fn credential(&self, participant: &Participant) -> Result<Option<Credential>, StoreError>;

    /// The credential with the given token id, if issued.
    fn credential_by_token(&self, token_id: TokenId) -> Result<Option<Credential>, StoreError>;

    /// The id the next issued credential will receive.
    fn next_token_id(&self) -> Result<TokenId, StoreError>;

    /// Number of credentials issued so far.
    fn issued_count(&self) -> Result<u64, StoreError>;
}

/// Staged writes inside a transaction.
pub trait StateWrite: StateRead {
    /// Append an endorsement to its recipient's list.
    fn append_endorsement(&mut self, endorsement: Endorsement) -> Result<(), StoreError>;

    /// Overwrite a participant's aggregate reputation.
    fn set_reputation(&mut self, participant: &Participant, total: u64) -> Result<(), StoreError>;

    /// Overwrite a participant's balance.
    fn set_balance(&mut self, participant: &Participant, balance: Value) -> Result<(), StoreError>;

    /// Record an issued credential. Fails with [`StoreError::Duplicate`] if the
    /// owner already holds one or the token id is taken.
    fn put_credential(&mut self, credential: Credential) -> Result<(), StoreError>;

    /// Advance the token id counter.
    fn set_next_token_id(&mut self, next: TokenId) -> Result<(), StoreError>;
}

/// A store that runs each call as one serialized, all-or-nothing transaction.
pub trait StateStore: Send + Sync {
    /// Run a read-only closure against committed state.
    fn view<T, E>(&self, f: impl FnOnce(&dyn StateRead) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;

    /// Run a closure against a staging view. Its writes are committed together
    /// if it returns `Ok`, and discarded if it returns `Err`.
    fn transact<T, E>(&self, f: impl FnOnce(&mut dyn StateWrite) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>;
}
