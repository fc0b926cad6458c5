//! Nullable proof verifier with scripted answers.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use credo_verification::{FieldElement, Proof, ProofVerifier};

/// A [`ProofVerifier`] that answers from a script instead of doing curve math.
///
/// Scripted answers are consumed in order; once the script runs out every
/// call gets the fallback answer. Every call's public input is recorded.
pub struct NullProofVerifier {
    fallback: bool,
    script: Mutex<VecDeque<bool>>,
    calls: Mutex<Vec<Vec<FieldElement>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl NullProofVerifier {
    /// Accepts every proof.
    pub fn accepting() -> Self {
        Self::with_fallback(true)
    }

    /// Rejects every proof.
    pub fn rejecting() -> Self {
        Self::with_fallback(false)
    }

    fn with_fallback(fallback: bool) -> Self {
        Self {
            fallback,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer the next calls with `answers`, then reject.
    pub fn scripted(answers: impl IntoIterator<Item = bool>) -> Self {
        let verifier = Self::rejecting();
        lock(&verifier.script).extend(answers);
        verifier
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Public inputs passed to each call, oldest first.
    pub fn recorded_inputs(&self) -> Vec<Vec<FieldElement>> {
        lock(&self.calls).clone()
    }
}

impl ProofVerifier for NullProofVerifier {
    fn verify(&self, _proof: &Proof, public_input: &[FieldElement]) -> bool {
        lock(&self.calls).push(public_input.to_vec());
        let answer = lock(&self.script).pop_front().unwrap_or(self.fallback);
        tracing::trace!(answer, "null verifier answered");
        answer
    }
}
