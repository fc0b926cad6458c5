//! Nullable store — an in-memory store whose commits can be made to fail.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use credo_store::{MemoryStore, StateRead, StateStore, StateWrite, StoreError};
use credo_types::{Participant, Value};

/// A [`MemoryStore`] that can be told to fail at commit time.
///
/// The wrapped call runs to completion against its staging view; if a
/// failure is armed, the call is then aborted with [`StoreError::Backend`]
/// and its writes are discarded. Used to check that no partial effects
/// survive a failed commit.
pub struct FailingStore {
    inner: MemoryStore,
    fail_commits: AtomicBool,
    failures: AtomicUsize,
}

impl FailingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_commits: AtomicBool::new(false),
            failures: AtomicUsize::new(0),
        }
    }

    pub fn with_genesis(
        allocations: impl IntoIterator<Item = (Participant, Value)>,
    ) -> Result<Self, StoreError> {
        Ok(Self::new(MemoryStore::with_genesis(allocations)?))
    }

    /// Make every subsequent commit fail until [`heal`](Self::heal) is called.
    pub fn fail_commits(&self) {
        self.fail_commits.store(true, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.fail_commits.store(false, Ordering::SeqCst);
    }

    /// Number of commits that were aborted by injection.
    pub fn injected_failures(&self) -> usize {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl StateStore for FailingStore {
    fn view<T, E>(&self, f: impl FnOnce(&dyn StateRead) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        self.inner.view(f)
    }

    fn transact<T, E>(&self, f: impl FnOnce(&mut dyn StateWrite) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        self.inner.transact(|txn| {
            let out = f(txn)?;
            if self.fail_commits.load(Ordering::SeqCst) {
                self.failures.fetch_add(1, Ordering::SeqCst);
                return Err(StoreError::Backend("injected commit failure".into()).into());
            }
            Ok(out)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_store::transfer_value;

    fn p(n: u64) -> Participant {
        Participant::from_low_u64(n)
    }

    #[test]
    fn armed_store_discards_writes() {
        let store = FailingStore::with_genesis([(p(1), Value::new(100))]).unwrap();
        store.fail_commits();
        let err = store
            .transact(|txn| transfer_value(txn, &p(1), &p(2), Value::new(40)))
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(store.injected_failures(), 1);
        assert_eq!(store.view(|s| s.balance(&p(1))).unwrap(), Value::new(100));
        assert_eq!(store.view(|s| s.balance(&p(2))).unwrap(), Value::ZERO);
    }

    #[test]
    fn healed_store_commits() {
        let store = FailingStore::with_genesis([(p(1), Value::new(100))]).unwrap();
        store.fail_commits();
        store.heal();
        store
            .transact(|txn| transfer_value(txn, &p(1), &p(2), Value::new(40)))
            .unwrap();
        assert_eq!(store.view(|s| s.balance(&p(2))).unwrap(), Value::new(40));
        assert_eq!(store.injected_failures(), 0);
    }

    #[test]
    fn closure_errors_pass_through_uncounted() {
        let store = FailingStore::with_genesis([(p(1), Value::new(10))]).unwrap();
        store.fail_commits();
        let err = store
            .transact(|txn| transfer_value(txn, &p(1), &p(2), Value::new(11)))
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientBalance { .. }));
        assert_eq!(store.injected_failures(), 0);
    }
}
