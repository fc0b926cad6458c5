//! Single-writer in-memory store.
//!
//! Every transaction holds the write lock for its whole duration, so calls are
//! totally ordered and never interleave. Writes go to a [`WriteSet`] overlay
//! and only reach the committed state when the transaction returns `Ok`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use credo_types::{Credential, Endorsement, Participant, TokenId, Value};

use crate::state::{StateRead, StateStore, StateWrite};
use crate::StoreError;

/// Committed ledger state.
#[derive(Clone, Debug)]
struct LedgerState {
    endorsements: HashMap<Participant, Vec<Endorsement>>,
    reputation: HashMap<Participant, u64>,
    balances: HashMap<Participant, Value>,
    credentials: HashMap<Participant, Credential>,
    owners: HashMap<TokenId, Participant>,
    next_token_id: TokenId,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            endorsements: HashMap::new(),
            reputation: HashMap::new(),
            balances: HashMap::new(),
            credentials: HashMap::new(),
            owners: HashMap::new(),
            next_token_id: TokenId::FIRST,
        }
    }
}

impl LedgerState {
    fn apply(&mut self, writes: WriteSet) {
        for (recipient, mut appended) in writes.appended {
            self.endorsements.entry(recipient).or_default().append(&mut appended);
        }
        self.reputation.extend(writes.reputation);
        self.balances.extend(writes.balances);
        for credential in writes.credentials.into_values() {
            self.owners.insert(credential.token_id, credential.owner);
            self.credentials.insert(credential.owner, credential);
        }
        if let Some(next) = writes.next_token_id {
            self.next_token_id = next;
        }
    }
}

impl StateRead for LedgerState {
    fn reputation(&self, participant: &Participant) -> Result<u64, StoreError> {
        Ok(self.reputation.get(participant).copied().unwrap_or(0))
    }

    fn endorsements(&self, participant: &Participant) -> Result<Vec<Endorsement>, StoreError> {
        Ok(self.endorsements.get(participant).cloned().unwrap_or_default())
    }

    fn endorsement_count(&self, participant: &Participant) -> Result<u64, StoreError> {
        Ok(self.endorsements.get(participant).map_or(0, |v| v.len() as u64))
    }

    fn balance(&self, participant: &Participant) -> Result<Value, StoreError> {
        Ok(self.balances.get(participant).copied().unwrap_or(Value::ZERO))
    }

    fn credential(&self, participant: &Participant) -> Result<Option<Credential>, StoreError> {
        Ok(self.credentials.get(participant).cloned())
    }

    fn credential_by_token(&self, token_id: TokenId) -> Result<Option<Credential>, StoreError> {
        Ok(self
            .owners
            .get(&token_id)
            .and_then(|owner| self.credentials.get(owner))
            .cloned())
    }

    fn next_token_id(&self) -> Result<TokenId, StoreError> {
        Ok(self.next_token_id)
    }

    fn issued_count(&self) -> Result<u64, StoreError> {
        Ok(self.credentials.len() as u64)
    }
}

/// Writes staged by one transaction.
#[derive(Default)]
struct WriteSet {
    appended: HashMap<Participant, Vec<Endorsement>>,
    reputation: HashMap<Participant, u64>,
    balances: HashMap<Participant, Value>,
    credentials: HashMap<Participant, Credential>,
    next_token_id: Option<TokenId>,
}

/// Staging view: committed state overlaid with this transaction's writes.
struct StagedTxn<'a> {
    base: &'a LedgerState,
    writes: WriteSet,
}

impl StateRead for StagedTxn<'_> {
    fn reputation(&self, participant: &Participant) -> Result<u64, StoreError> {
        match self.writes.reputation.get(participant) {
            Some(total) => Ok(*total),
            None => self.base.reputation(participant),
        }
    }

    fn endorsements(&self, participant: &Participant) -> Result<Vec<Endorsement>, StoreError> {
        let mut all = self.base.endorsements(participant)?;
        if let Some(staged) = self.writes.appended.get(participant) {
            all.extend(staged.iter().cloned());
        }
        Ok(all)
    }

    fn endorsement_count(&self, participant: &Participant) -> Result<u64, StoreError> {
        let staged = self.writes.appended.get(participant).map_or(0, |v| v.len() as u64);
        Ok(self.base.endorsement_count(participant)? + staged)
    }

    fn balance(&self, participant: &Participant) -> Result<Value, StoreError> {
        match self.writes.balances.get(participant) {
            Some(balance) => Ok(*balance),
            None => self.base.balance(participant),
        }
    }

    fn credential(&self, participant: &Participant) -> Result<Option<Credential>, StoreError> {
        match self.writes.credentials.get(participant) {
            Some(c) => Ok(Some(c.clone())),
            None => self.base.credential(participant),
        }
    }

    fn credential_by_token(&self, token_id: TokenId) -> Result<Option<Credential>, StoreError> {
        if let Some(c) = self.writes.credentials.values().find(|c| c.token_id == token_id) {
            return Ok(Some(c.clone()));
        }
        self.base.credential_by_token(token_id)
    }

    fn next_token_id(&self) -> Result<TokenId, StoreError> {
        match self.writes.next_token_id {
            Some(next) => Ok(next),
            None => self.base.next_token_id(),
        }
    }

    fn issued_count(&self) -> Result<u64, StoreError> {
        Ok(self.base.issued_count()? + self.writes.credentials.len() as u64)
    }
}

impl StateWrite for StagedTxn<'_> {
    fn append_endorsement(&mut self, endorsement: Endorsement) -> Result<(), StoreError> {
        self.writes
            .appended
            .entry(endorsement.to)
            .or_default()
            .push(endorsement);
        Ok(())
    }

    fn set_reputation(&mut self, participant: &Participant, total: u64) -> Result<(), StoreError> {
        self.writes.reputation.insert(*participant, total);
        Ok(())
    }

    fn set_balance(&mut self, participant: &Participant, balance: Value) -> Result<(), StoreError> {
        self.writes.balances.insert(*participant, balance);
        Ok(())
    }

    fn put_credential(&mut self, credential: Credential) -> Result<(), StoreError> {
        if self.credential(&credential.owner)?.is_some() {
            return Err(StoreError::Duplicate(format!(
                "credential for {}",
                credential.owner
            )));
        }
        if self.credential_by_token(credential.token_id)?.is_some() {
            return Err(StoreError::Duplicate(format!("token {}", credential.token_id)));
        }
        self.writes.credentials.insert(credential.owner, credential);
        Ok(())
    }

    fn set_next_token_id(&mut self, next: TokenId) -> Result<(), StoreError> {
        self.writes.next_token_id = Some(next);
        Ok(())
    }
}

/// Thread-safe in-memory ledger state with serialized transactions.
pub struct MemoryStore {
    state: RwLock<LedgerState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Create a store with initial balances (the environment's genesis allocation).
    pub fn with_genesis(
        allocations: impl IntoIterator<Item = (Participant, Value)>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        for (participant, amount) in allocations {
            store.fund(&participant, amount)?;
        }
        Ok(store)
    }

    /// Credit value to a participant outside of any call.
    pub fn fund(&self, participant: &Participant, amount: Value) -> Result<(), StoreError> {
        let mut state = self.write_state();
        let current = state.balance(participant)?;
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| StoreError::BalanceOverflow(participant.to_string()))?;
        state.balances.insert(*participant, updated);
        Ok(())
    }

    // A panic inside a transaction leaves only staged writes behind, so the
    // committed state under a poisoned lock is still whole.
    fn read_state(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering state lock after a panicked transaction");
            poisoned.into_inner()
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MemoryStore {
    fn view<T, E>(&self, f: impl FnOnce(&dyn StateRead) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let state = self.read_state();
        f(&*state)
    }

    fn transact<T, E>(&self, f: impl FnOnce(&mut dyn StateWrite) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut state = self.write_state();
        let (result, writes) = {
            let mut txn = StagedTxn {
                base: &*state,
                writes: WriteSet::default(),
            };
            let result = f(&mut txn);
            (result, txn.writes)
        };
        match result {
            Ok(out) => {
                state.apply(writes);
                Ok(out)
            }
            Err(e) => {
                tracing::trace!("transaction rolled back");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_types::IssuancePath;

    fn p(n: u64) -> Participant {
        Participant::from_low_u64(n)
    }

    fn endorsement(from: u64, to: u64, points: u64, index: u64) -> Endorsement {
        Endorsement {
            from: p(from),
            to: p(to),
            points,
            message: "ok".into(),
            amount_sent: Value::new(1),
            sequence_index: index,
        }
    }

    #[test]
    fn empty_store_reads_defaults() {
        let store = MemoryStore::new();
        store
            .view(|s| {
                assert_eq!(s.reputation(&p(1))?, 0);
                assert!(s.endorsements(&p(1))?.is_empty());
                assert_eq!(s.balance(&p(1))?, Value::ZERO);
                assert_eq!(s.credential(&p(1))?, None);
                assert_eq!(s.next_token_id()?, TokenId::FIRST);
                assert_eq!(s.issued_count()?, 0);
                Ok::<_, StoreError>(())
            })
            .unwrap();
    }

    #[test]
    fn committed_transaction_is_visible() {
        let store = MemoryStore::new();
        store
            .transact(|txn| {
                txn.append_endorsement(endorsement(1, 2, 10, 0))?;
                txn.set_reputation(&p(2), 10)?;
                Ok::<_, StoreError>(())
            })
            .unwrap();

        let (rep, list) = store
            .view(|s| Ok::<_, StoreError>((s.reputation(&p(2))?, s.endorsements(&p(2))?)))
            .unwrap();
        assert_eq!(rep, 10);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn failed_transaction_discards_every_write() {
        let store = MemoryStore::with_genesis([(p(1), Value::new(100))]).unwrap();
        let result: Result<(), StoreError> = store.transact(|txn| {
            txn.append_endorsement(endorsement(1, 2, 10, 0))?;
            txn.set_reputation(&p(2), 10)?;
            txn.set_balance(&p(1), Value::ZERO)?;
            Err(StoreError::Backend("abort".into()))
        });
        assert!(result.is_err());

        store
            .view(|s| {
                assert_eq!(s.reputation(&p(2))?, 0);
                assert_eq!(s.endorsement_count(&p(2))?, 0);
                assert_eq!(s.balance(&p(1))?, Value::new(100));
                Ok::<_, StoreError>(())
            })
            .unwrap();
    }

    #[test]
    fn staged_reads_see_own_writes() {
        let store = MemoryStore::new();
        store
            .transact(|txn| {
                txn.append_endorsement(endorsement(1, 2, 5, 0))?;
                txn.append_endorsement(endorsement(3, 2, 7, 1))?;
                txn.set_reputation(&p(2), 12)?;
                assert_eq!(txn.reputation(&p(2))?, 12);
                assert_eq!(txn.endorsement_count(&p(2))?, 2);
                assert_eq!(txn.endorsements(&p(2))?[1].points, 7);
                Ok::<_, StoreError>(())
            })
            .unwrap();
    }

    #[test]
    fn put_credential_rejects_second_for_same_owner() {
        let store = MemoryStore::new();
        let first = Credential {
            token_id: TokenId::new(1),
            owner: p(1),
            path: IssuancePath::Reputation,
        };
        store
            .transact(|txn| txn.put_credential(first.clone()))
            .unwrap();

        let again = Credential {
            token_id: TokenId::new(2),
            ..first.clone()
        };
        let result = store.transact(|txn| txn.put_credential(again));
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        let found = store.view(|s| s.credential_by_token(TokenId::new(1))).unwrap();
        assert_eq!(found, Some(first));
        assert_eq!(store.view(|s| s.issued_count()).unwrap(), 1);
    }

    #[test]
    fn fund_accumulates_and_rejects_overflow() {
        let store = MemoryStore::new();
        store.fund(&p(1), Value::new(5)).unwrap();
        store.fund(&p(1), Value::new(6)).unwrap();
        assert_eq!(store.view(|s| s.balance(&p(1))).unwrap(), Value::new(11));
        assert!(store.fund(&p(1), Value::new(u128::MAX)).is_err());
    }

    #[test]
    fn panicked_transaction_leaves_store_usable() {
        let store = MemoryStore::with_genesis([(p(1), Value::new(100))]).unwrap();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), StoreError> = store.transact(|txn| {
                txn.set_balance(&p(1), Value::ZERO)?;
                txn.set_reputation(&p(2), 40)?;
                panic!("verifier blew up");
            });
        }));
        assert!(outcome.is_err());

        assert_eq!(store.view(|s| s.balance(&p(1))).unwrap(), Value::new(100));
        assert_eq!(store.view(|s| s.reputation(&p(2))).unwrap(), 0);
        store
            .transact(|txn| txn.set_reputation(&p(2), 5))
            .unwrap();
        assert_eq!(store.view(|s| s.reputation(&p(2))).unwrap(), 5);
    }
}
