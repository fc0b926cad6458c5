//! The call dispatcher: one entry point for every mutating call.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::Serialize;

use credo_ledger::EndorsementLedger;
use credo_registry::{CredentialRegistry, RegistryError};
use credo_store::{MemoryStore, StateStore};
use credo_types::{ErrorKind, IssuancePath, Participant, TokenId, Value};
use credo_verification::{Groth16Verifier, Proof, ProofVerifier, VerificationKey};

use crate::config::NodeConfig;
use crate::event::{CredoEvent, EventBus};
use crate::metrics::NodeMetrics;
use crate::NodeError;

/// A mutating call, as submitted by the execution environment.
///
/// The first participant field of each variant is the authenticated caller.
#[derive(Clone, Debug)]
pub enum Call {
    Attest {
        from: Participant,
        to: Participant,
        points: u64,
        message: String,
        amount_sent: Value,
    },
    ClaimByReputation {
        caller: Participant,
    },
    ClaimByProof {
        caller: Participant,
        proof: Proof,
    },
    Transfer {
        caller: Participant,
        token_id: TokenId,
        to: Participant,
    },
    TransferFrom {
        caller: Participant,
        from: Participant,
        to: Participant,
        token_id: TokenId,
    },
    SafeTransferFrom {
        caller: Participant,
        from: Participant,
        to: Participant,
        token_id: TokenId,
    },
    Approve {
        caller: Participant,
        spender: Participant,
        token_id: TokenId,
    },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attest { .. } => "attest",
            Self::ClaimByReputation { .. } => "claim_by_reputation",
            Self::ClaimByProof { .. } => "claim_by_proof",
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::SafeTransferFrom { .. } => "safe_transfer_from",
            Self::Approve { .. } => "approve",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Success { events: Vec<CredoEvent> },
    Failed { kind: ErrorKind, reason: String },
}

/// The record of one executed call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Position in the total order of executed calls, starting at 0.
    pub sequence: u64,
    pub call: &'static str,
    pub outcome: Outcome,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    pub fn events(&self) -> &[CredoEvent] {
        match &self.outcome {
            Outcome::Success { events } => events,
            Outcome::Failed { .. } => &[],
        }
    }

    pub fn failure_kind(&self) -> Option<ErrorKind> {
        match &self.outcome {
            Outcome::Failed { kind, .. } => Some(*kind),
            Outcome::Success { .. } => None,
        }
    }
}

/// Owns the shared store and the three components built over it.
pub struct Runtime {
    store: Arc<MemoryStore>,
    ledger: Arc<EndorsementLedger<MemoryStore>>,
    registry: CredentialRegistry<MemoryStore>,
    events: EventBus,
    metrics: Option<NodeMetrics>,
    next_sequence: Mutex<u64>,
}

impl Runtime {
    /// Build a runtime whose verifier is loaded from the configured
    /// `verification_key` file.
    pub fn from_config(config: NodeConfig) -> Result<Self, NodeError> {
        let path = config
            .verification_key
            .as_ref()
            .ok_or(NodeError::MissingVerifier)?;
        let json = std::fs::read_to_string(path)?;
        let vk = VerificationKey::from_snarkjs_json(&json)?;
        let expected = config.registry.eligibility_input.len();
        if vk.public_input_count() != expected {
            return Err(NodeError::Config(format!(
                "verification key {} takes {} public inputs but eligibility_input has {}",
                path.display(),
                vk.public_input_count(),
                expected
            )));
        }
        tracing::info!(
            path = %path.display(),
            public_inputs = vk.public_input_count(),
            "loaded verification key"
        );
        Self::with_verifier(config, Arc::new(Groth16Verifier::new(vk)))
    }

    /// Build a runtime with an explicitly supplied verifier.
    pub fn with_verifier(config: NodeConfig, verifier: Arc<dyn ProofVerifier>) -> Result<Self, NodeError> {
        let store = Arc::new(MemoryStore::with_genesis(
            config.genesis.iter().map(|a| (a.participant, a.balance)),
        )?);
        let ledger = Arc::new(EndorsementLedger::new(store.clone(), config.ledger.clone()));
        let registry = CredentialRegistry::new(
            config.registry.clone(),
            store.clone(),
            ledger.clone(),
            verifier,
        );
        let metrics = if config.enable_metrics {
            Some(NodeMetrics::new()?)
        } else {
            None
        };
        tracing::info!(
            owner = %config.registry.owner,
            threshold = config.registry.threshold,
            genesis = config.genesis.len(),
            "runtime initialized"
        );
        Ok(Self {
            store,
            ledger,
            registry,
            events: EventBus::new(),
            metrics,
            next_sequence: Mutex::new(0),
        })
    }

    /// Register an event listener. Listeners see events of successful calls only.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&CredoEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Execute one call. Calls are serialized; each gets the next sequence number.
    pub fn execute(&self, call: Call) -> Receipt {
        let mut next = self
            .next_sequence
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let sequence = *next;
        *next += 1;

        let name = call.name();
        let started = Instant::now();
        let result = self.dispatch(call);

        if let Some(metrics) = &self.metrics {
            metrics.record_call(name);
            metrics
                .call_duration_ms
                .observe(started.elapsed().as_secs_f64() * 1_000.0);
        }

        let outcome = match result {
            Ok(events) => {
                for event in &events {
                    self.observe(event);
                    self.events.emit(event);
                }
                tracing::debug!(sequence, call = name, events = events.len(), "call succeeded");
                Outcome::Success { events }
            }
            Err((kind, reason)) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_failure(kind);
                }
                tracing::warn!(sequence, call = name, %kind, %reason, "call rejected");
                Outcome::Failed { kind, reason }
            }
        };
        Receipt {
            sequence,
            call: name,
            outcome,
        }
    }

    fn dispatch(&self, call: Call) -> Result<Vec<CredoEvent>, (ErrorKind, String)> {
        fn failed(e: RegistryError) -> (ErrorKind, String) {
            (e.kind(), e.to_string())
        }

        match call {
            Call::Attest {
                from,
                to,
                points,
                message,
                amount_sent,
            } => {
                let endorsement = self
                    .ledger
                    .attest(&from, &to, points, &message, amount_sent)
                    .map_err(|e| (e.kind(), e.to_string()))?;
                Ok(vec![CredoEvent::Attested {
                    from: endorsement.from,
                    to: endorsement.to,
                    points: endorsement.points,
                    amount_sent: endorsement.amount_sent,
                }])
            }
            Call::ClaimByReputation { caller } => {
                let token_id = self.registry.claim_by_reputation(&caller).map_err(failed)?;
                Ok(vec![CredoEvent::CredentialIssued {
                    owner: caller,
                    token_id,
                    path: IssuancePath::Reputation,
                }])
            }
            Call::ClaimByProof { caller, proof } => {
                let token_id = self.registry.claim_by_proof(&caller, &proof).map_err(failed)?;
                Ok(vec![CredoEvent::CredentialIssued {
                    owner: caller,
                    token_id,
                    path: IssuancePath::Proof,
                }])
            }
            Call::Transfer {
                caller,
                token_id,
                to,
            } => self
                .registry
                .transfer(&caller, token_id, &to)
                .map(|()| Vec::new())
                .map_err(failed),
            Call::TransferFrom {
                caller,
                from,
                to,
                token_id,
            } => self
                .registry
                .transfer_from(&caller, &from, &to, token_id)
                .map(|()| Vec::new())
                .map_err(failed),
            Call::SafeTransferFrom {
                caller,
                from,
                to,
                token_id,
            } => self
                .registry
                .safe_transfer_from(&caller, &from, &to, token_id)
                .map(|()| Vec::new())
                .map_err(failed),
            Call::Approve {
                caller,
                spender,
                token_id,
            } => self
                .registry
                .approve(&caller, &spender, token_id)
                .map(|()| Vec::new())
                .map_err(failed),
        }
    }

    fn observe(&self, event: &CredoEvent) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        match event {
            CredoEvent::Attested { amount_sent, .. } => metrics.record_endorsement(*amount_sent),
            CredoEvent::CredentialIssued { .. } => metrics.credentials_issued.inc(),
        }
    }

    /// Value balance of a participant.
    pub fn balance(&self, participant: &Participant) -> Result<Value, NodeError> {
        self.store
            .view(|s| s.balance(participant).map_err(NodeError::from))
    }

    pub fn ledger(&self) -> &EndorsementLedger<MemoryStore> {
        &self.ledger
    }

    pub fn registry(&self) -> &CredentialRegistry<MemoryStore> {
        &self.registry
    }

    pub fn metrics(&self) -> Option<&NodeMetrics> {
        self.metrics.as_ref()
    }
}
