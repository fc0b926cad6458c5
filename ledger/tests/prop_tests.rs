use std::sync::Arc;

use proptest::prelude::*;

use credo_ledger::{EndorsementLedger, LedgerError};
use credo_nullables::FailingStore;
use credo_store::{MemoryStore, StateStore};
use credo_types::{LedgerParams, Participant, Value};

const PARTICIPANTS: u64 = 5;

fn p(n: u64) -> Participant {
    Participant::from_low_u64(n)
}

const STARTING_BALANCE: u128 = 1_000_000;

fn ledger_with_store() -> (Arc<MemoryStore>, EndorsementLedger<MemoryStore>) {
    let store = Arc::new(
        MemoryStore::with_genesis((0..PARTICIPANTS).map(|n| (p(n), Value::new(STARTING_BALANCE))))
            .unwrap(),
    );
    let ledger = EndorsementLedger::new(store.clone(), LedgerParams::default());
    (store, ledger)
}

fn ledger() -> EndorsementLedger<MemoryStore> {
    ledger_with_store().1
}

/// One attempted endorsement: (from, to, points, amount).
fn attempt() -> impl Strategy<Value = (u64, u64, u64, u128)> {
    (0..PARTICIPANTS, 0..PARTICIPANTS, 0u64..100, 0u128..1_000)
}

proptest! {
    /// Reputation equals the sum of recorded points for every participant,
    /// no matter which attempts succeed or fail.
    #[test]
    fn reputation_matches_history(attempts in prop::collection::vec(attempt(), 0..40)) {
        let ledger = ledger();
        for (from, to, points, amount) in attempts {
            let _ = ledger.attest(&p(from), &p(to), points, "prop", Value::new(amount));
            for n in 0..PARTICIPANTS {
                let history = ledger.get_endorsements(&p(n)).unwrap();
                let sum: u64 = history.iter().map(|e| e.points).sum();
                prop_assert_eq!(ledger.get_reputation(&p(n)).unwrap(), sum);
            }
        }
    }

    /// Self-endorsement always fails, whatever the other arguments.
    #[test]
    fn self_endorsement_always_fails(
        who in 0..PARTICIPANTS,
        points in any::<u64>(),
        amount in any::<u128>(),
        message in "[a-z ]{0,32}",
    ) {
        let ledger = ledger();
        let err = ledger.attest(&p(who), &p(who), points, &message, Value::new(amount)).unwrap_err();
        prop_assert!(matches!(err, LedgerError::SelfEndorsement));
        prop_assert_eq!(ledger.get_reputation(&p(who)).unwrap(), 0);
    }

    /// A zero payment always fails between distinct participants.
    #[test]
    fn zero_payment_always_fails(from in 0..PARTICIPANTS, offset in 1..PARTICIPANTS, points in any::<u64>()) {
        let to = (from + offset) % PARTICIPANTS;
        let ledger = ledger();
        let err = ledger.attest(&p(from), &p(to), points, "", Value::ZERO).unwrap_err();
        prop_assert!(matches!(err, LedgerError::ZeroPayment));
        prop_assert_eq!(ledger.endorsement_count(&p(to)).unwrap(), 0);
    }

    /// Sequence indices are 0..n in insertion order for each recipient.
    #[test]
    fn sequence_indices_are_dense(attempts in prop::collection::vec(attempt(), 0..40)) {
        let ledger = ledger();
        for (from, to, points, amount) in attempts {
            let _ = ledger.attest(&p(from), &p(to), points, "", Value::new(amount));
        }
        for n in 0..PARTICIPANTS {
            let indices: Vec<u64> = ledger
                .get_endorsements(&p(n))
                .unwrap()
                .iter()
                .map(|e| e.sequence_index)
                .collect();
            let expected: Vec<u64> = (0..indices.len() as u64).collect();
            prop_assert_eq!(indices, expected);
        }
    }

    /// Each successful endorsement never holds value back: the recipient gains
    /// exactly what the sender loses.
    #[test]
    fn payment_is_forwarded_exactly(from in 0..PARTICIPANTS, offset in 1..PARTICIPANTS, amount in 1u128..1_000) {
        let to = (from + offset) % PARTICIPANTS;
        let (store, ledger) = ledger_with_store();
        ledger.attest(&p(from), &p(to), 1, "", Value::new(amount)).unwrap();
        let sender = store.view(|s| s.balance(&p(from))).unwrap();
        let recipient = store.view(|s| s.balance(&p(to))).unwrap();
        prop_assert_eq!(sender.raw(), STARTING_BALANCE - amount);
        prop_assert_eq!(recipient.raw(), STARTING_BALANCE + amount);
    }

    /// When the commit fails, an otherwise valid endorsement leaves no trace.
    #[test]
    fn failed_commit_changes_nothing(from in 0..PARTICIPANTS, offset in 1..PARTICIPANTS, points in 1u64..100, amount in 1u128..1_000) {
        let to = (from + offset) % PARTICIPANTS;
        let store = Arc::new(
            FailingStore::with_genesis((0..PARTICIPANTS).map(|n| (p(n), Value::new(STARTING_BALANCE)))).unwrap(),
        );
        let ledger = EndorsementLedger::new(store.clone(), LedgerParams::default());
        store.fail_commits();

        let err = ledger.attest(&p(from), &p(to), points, "lost", Value::new(amount)).unwrap_err();
        prop_assert!(matches!(err, LedgerError::Store(_)));
        prop_assert_eq!(ledger.get_reputation(&p(to)).unwrap(), 0);
        prop_assert_eq!(ledger.endorsement_count(&p(to)).unwrap(), 0);
        prop_assert_eq!(store.view(|s| s.balance(&p(from))).unwrap().raw(), STARTING_BALANCE);
        prop_assert_eq!(store.view(|s| s.balance(&p(to))).unwrap().raw(), STARTING_BALANCE);
    }
}
