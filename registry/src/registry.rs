//! The credential registry component.

use std::sync::Arc;

use credo_ledger::EndorsementLedger;
use credo_store::{StateRead, StateStore, StateWrite};
use credo_types::{Credential, CredentialState, IssuancePath, Participant, TokenId};
use credo_verification::{FieldElement, Proof, ProofVerifier};

use crate::config::RegistryConfig;
use crate::error::RegistryError;

/// Issues soulbound credentials.
///
/// Reads reputation through the [`EndorsementLedger`] and delegates proof
/// checking to the injected [`ProofVerifier`]. Owns the credential slice of
/// the shared state.
pub struct CredentialRegistry<S> {
    store: Arc<S>,
    ledger: Arc<EndorsementLedger<S>>,
    verifier: Arc<dyn ProofVerifier>,
    config: RegistryConfig,
}

impl<S: StateStore> CredentialRegistry<S> {
    pub fn new(
        config: RegistryConfig,
        store: Arc<S>,
        ledger: Arc<EndorsementLedger<S>>,
        verifier: Arc<dyn ProofVerifier>,
    ) -> Self {
        Self {
            store,
            ledger,
            verifier,
            config,
        }
    }

    /// Claim a credential on the strength of aggregate reputation.
    pub fn claim_by_reputation(&self, caller: &Participant) -> Result<TokenId, RegistryError> {
        self.store.transact(|txn| {
            Self::ensure_unclaimed(&*txn, caller)?;
            let have = self.ledger.reputation_at(&*txn, caller)?;
            if have < self.config.threshold {
                return Err(RegistryError::InsufficientReputation {
                    have,
                    need: self.config.threshold,
                });
            }
            Self::issue(txn, caller, IssuancePath::Reputation)
        })
    }

    /// Claim a credential with a zero-knowledge proof of eligibility.
    ///
    /// The proof is checked against the registry's own expected public input;
    /// reputation is not consulted.
    pub fn claim_by_proof(&self, caller: &Participant, proof: &Proof) -> Result<TokenId, RegistryError> {
        self.store.transact(|txn| {
            Self::ensure_unclaimed(&*txn, caller)?;
            if !self.verifier.verify(proof, &self.config.eligibility_input) {
                return Err(RegistryError::InvalidProof);
            }
            Self::issue(txn, caller, IssuancePath::Proof)
        })
    }

    fn ensure_unclaimed<V>(view: &V, caller: &Participant) -> Result<(), RegistryError>
    where
        V: StateRead + ?Sized,
    {
        match view.credential(caller)? {
            Some(existing) => Err(RegistryError::AlreadyIssued {
                owner: *caller,
                token_id: existing.token_id,
            }),
            None => Ok(()),
        }
    }

    fn issue(
        txn: &mut dyn StateWrite,
        caller: &Participant,
        path: IssuancePath,
    ) -> Result<TokenId, RegistryError> {
        let token_id = txn.next_token_id()?;
        let following = token_id.next().ok_or(RegistryError::TokenIdsExhausted)?;
        txn.put_credential(Credential {
            token_id,
            owner: *caller,
            path,
        })?;
        txn.set_next_token_id(following)?;
        tracing::debug!(owner = %caller, token = %token_id, ?path, "credential issued");
        Ok(token_id)
    }

    // Credentials never move.

    pub fn transfer(
        &self,
        _caller: &Participant,
        _token_id: TokenId,
        _to: &Participant,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Soulbound)
    }

    pub fn transfer_from(
        &self,
        _caller: &Participant,
        _from: &Participant,
        _to: &Participant,
        _token_id: TokenId,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Soulbound)
    }

    pub fn safe_transfer_from(
        &self,
        _caller: &Participant,
        _from: &Participant,
        _to: &Participant,
        _token_id: TokenId,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Soulbound)
    }

    pub fn approve(
        &self,
        _caller: &Participant,
        _spender: &Participant,
        _token_id: TokenId,
    ) -> Result<(), RegistryError> {
        Err(RegistryError::Soulbound)
    }

    pub fn credential_state(&self, participant: &Participant) -> Result<CredentialState, RegistryError> {
        Ok(self
            .credential_of(participant)?
            .map(|c| c.state())
            .unwrap_or_default())
    }

    pub fn credential_of(&self, participant: &Participant) -> Result<Option<Credential>, RegistryError> {
        self.store
            .view(|s| s.credential(participant).map_err(RegistryError::from))
    }

    /// 0 or 1.
    pub fn balance_of(&self, participant: &Participant) -> Result<u64, RegistryError> {
        Ok(u64::from(self.credential_of(participant)?.is_some()))
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<Option<Participant>, RegistryError> {
        self.store.view(|s| {
            Ok::<_, RegistryError>(s.credential_by_token(token_id)?.map(|c| c.owner))
        })
    }

    pub fn get_reputation(&self, participant: &Participant) -> Result<u64, RegistryError> {
        Ok(self.ledger.get_reputation(participant)?)
    }

    pub fn total_issued(&self) -> Result<u64, RegistryError> {
        self.store
            .view(|s| s.issued_count().map_err(RegistryError::from))
    }

    pub fn owner(&self) -> &Participant {
        &self.config.owner
    }

    pub fn threshold(&self) -> u64 {
        self.config.threshold
    }

    pub fn eligibility_input(&self) -> &[FieldElement] {
        &self.config.eligibility_input
    }
}
