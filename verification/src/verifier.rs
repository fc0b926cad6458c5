use std::sync::Arc;

use crate::field::FieldElement;
use crate::types::Proof;

/// Decides whether a proof is valid for the given public inputs.
///
/// Never errors: malformed input, wrong arity and a failed check are all
/// just `false`.
pub trait ProofVerifier: Send + Sync {
    fn verify(&self, proof: &Proof, public_input: &[FieldElement]) -> bool;
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for Arc<V> {
    fn verify(&self, proof: &Proof, public_input: &[FieldElement]) -> bool {
        (**self).verify(proof, public_input)
    }
}

impl<V: ProofVerifier + ?Sized> ProofVerifier for Box<V> {
    fn verify(&self, proof: &Proof, public_input: &[FieldElement]) -> bool {
        (**self).verify(proof, public_input)
    }
}
