//! The endorsement ledger component.

use std::sync::Arc;

use credo_store::{transfer_value, StateRead, StateStore, StateWrite, StoreError};
use credo_types::{Endorsement, LedgerParams, Participant, Value};

use crate::error::LedgerError;

/// Records endorsements and maintains aggregate reputation per participant.
///
/// Owns the endorsement and reputation slices of the shared state. Other
/// components read reputation through [`EndorsementLedger::get_reputation`]
/// or, inside their own open call, [`EndorsementLedger::reputation_at`].
pub struct EndorsementLedger<S> {
    store: Arc<S>,
    params: LedgerParams,
}

impl<S: StateStore> EndorsementLedger<S> {
    pub fn new(store: Arc<S>, params: LedgerParams) -> Self {
        Self { store, params }
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    /// Record an endorsement from `from` to `to` as one atomic call.
    ///
    /// Appends the record, adds `points` to the recipient's reputation and
    /// forwards `amount_sent` from `from` to `to`. On any error nothing changes.
    pub fn attest(
        &self,
        from: &Participant,
        to: &Participant,
        points: u64,
        message: &str,
        amount_sent: Value,
    ) -> Result<Endorsement, LedgerError> {
        self.store
            .transact(|txn| self.attest_in(txn, from, to, points, message, amount_sent))
    }

    /// Stage an endorsement into an already open call.
    ///
    /// Every precondition is checked before the first write is staged.
    pub fn attest_in(
        &self,
        txn: &mut dyn StateWrite,
        from: &Participant,
        to: &Participant,
        points: u64,
        message: &str,
        amount_sent: Value,
    ) -> Result<Endorsement, LedgerError> {
        self.validate(from, to, points, message, amount_sent)?;

        let current = txn.reputation(to)?;
        let total = current
            .checked_add(points)
            .ok_or(LedgerError::ReputationOverflow { current, points })?;
        let sequence_index = txn.endorsement_count(to)?;

        let endorsement = Endorsement {
            from: *from,
            to: *to,
            points,
            message: message.to_owned(),
            amount_sent,
            sequence_index,
        };

        transfer_value(txn, from, to, amount_sent).map_err(|e| match e {
            StoreError::InsufficientBalance { needed, available } => {
                LedgerError::InsufficientFunds { needed, available }
            }
            other => LedgerError::Store(other),
        })?;
        txn.append_endorsement(endorsement.clone())?;
        txn.set_reputation(to, total)?;

        tracing::debug!(
            from = %from,
            to = %to,
            points,
            amount = %amount_sent,
            reputation = total,
            "endorsement recorded"
        );
        Ok(endorsement)
    }

    /// Argument checks, in the order failures are reported.
    fn validate(
        &self,
        from: &Participant,
        to: &Participant,
        points: u64,
        message: &str,
        amount_sent: Value,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::SelfEndorsement);
        }
        if amount_sent.is_zero() {
            return Err(LedgerError::ZeroPayment);
        }
        if points == 0 {
            return Err(LedgerError::ZeroPoints);
        }
        if message.len() > self.params.max_message_len {
            return Err(LedgerError::MessageTooLong {
                len: message.len(),
                max: self.params.max_message_len,
            });
        }
        Ok(())
    }

    /// Aggregate reputation of `participant`; 0 if never endorsed.
    pub fn get_reputation(&self, participant: &Participant) -> Result<u64, LedgerError> {
        self.store.view(|s| self.reputation_at(s, participant))
    }

    /// Alias of [`get_reputation`](Self::get_reputation).
    pub fn get_points(&self, participant: &Participant) -> Result<u64, LedgerError> {
        self.get_reputation(participant)
    }

    /// Every endorsement received by `participant`, oldest first.
    pub fn get_endorsements(&self, participant: &Participant) -> Result<Vec<Endorsement>, LedgerError> {
        self.store.view(|s| self.endorsements_at(s, participant))
    }

    pub fn endorsement_count(&self, participant: &Participant) -> Result<u64, LedgerError> {
        self.store
            .view(|s| s.endorsement_count(participant).map_err(LedgerError::from))
    }

    /// Reputation as seen by an open call (includes that call's staged writes).
    pub fn reputation_at<V>(&self, view: &V, participant: &Participant) -> Result<u64, LedgerError>
    where
        V: StateRead + ?Sized,
    {
        Ok(view.reputation(participant)?)
    }

    /// Endorsement history as seen by an open call.
    pub fn endorsements_at<V>(
        &self,
        view: &V,
        participant: &Participant,
    ) -> Result<Vec<Endorsement>, LedgerError>
    where
        V: StateRead + ?Sized,
    {
        Ok(view.endorsements(participant)?)
    }
}
