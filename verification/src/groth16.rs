//! Groth16 verification against a fixed key.

use crate::backend::PairingBackend;
use crate::bn254::Bn254Backend;
use crate::error::VerificationError;
use crate::field::FieldElement;
use crate::types::{Proof, VerificationKey};
use crate::verifier::ProofVerifier;

/// Verifies Groth16 proofs for one circuit.
///
/// Accepts iff
/// `e(-A, B) · e(α, β) · e(vk_x, γ) · e(C, δ) = 1`
/// where `vk_x = IC[0] + Σ input[i] · IC[i + 1]`.
pub struct Groth16Verifier<B = Bn254Backend> {
    vk: VerificationKey,
    backend: B,
}

impl Groth16Verifier<Bn254Backend> {
    pub fn new(vk: VerificationKey) -> Self {
        Self::with_backend(vk, Bn254Backend::new())
    }
}

impl<B: PairingBackend> Groth16Verifier<B> {
    pub fn with_backend(vk: VerificationKey, backend: B) -> Self {
        Self { vk, backend }
    }

    pub fn verification_key(&self) -> &VerificationKey {
        &self.vk
    }

    /// Full check with the reason for rejection.
    ///
    /// `Ok(false)` means the inputs were well formed but the pairing equation
    /// does not hold.
    pub fn check(&self, proof: &Proof, public_input: &[FieldElement]) -> Result<bool, VerificationError> {
        let expected = self.vk.public_input_count();
        if public_input.len() != expected {
            return Err(VerificationError::InputArity {
                expected,
                got: public_input.len(),
            });
        }
        if let Some(i) = public_input.iter().position(|x| !x.is_scalar()) {
            return Err(VerificationError::InputOutOfField(i));
        }

        let (constant, weights) = self.vk.ic.split_first().ok_or(VerificationError::Malformed {
            what: "verification key",
            reason: "empty IC".into(),
        })?;
        let mut vk_x = *constant;
        for (input, ic) in public_input.iter().zip(weights) {
            let term = self.backend.g1_mul(ic, input)?;
            vk_x = self.backend.g1_add(&vk_x, &term)?;
        }

        let neg_a = self.backend.g1_negate(&proof.a)?;
        let pairs = [
            (neg_a, proof.b),
            (self.vk.alpha, self.vk.beta),
            (vk_x, self.vk.gamma),
            (proof.c, self.vk.delta),
        ];
        Ok(self.backend.pairing_check(&pairs)?)
    }
}

impl<B: PairingBackend> ProofVerifier for Groth16Verifier<B> {
    fn verify(&self, proof: &Proof, public_input: &[FieldElement]) -> bool {
        match self.check(proof, public_input) {
            Ok(valid) => {
                if !valid {
                    tracing::debug!("pairing check failed");
                }
                valid
            }
            Err(e) => {
                tracing::debug!(error = %e, "proof rejected");
                false
            }
        }
    }
}
