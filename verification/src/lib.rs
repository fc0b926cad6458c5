//! Zero-knowledge proof verification.
//!
//! Eligibility proofs are Groth16 proofs over BN254, the format snarkjs emits
//! and the EVM verifies through its pairing precompiles. Verification is split
//! into two layers:
//!
//! - [`ProofVerifier`]: the one-method capability the credential registry
//!   depends on. Returns `true` or `false`; an invalid proof is a normal
//!   negative result, never an error.
//! - [`PairingBackend`]: the curve arithmetic (G1 add/mul/negate and the
//!   multi-pairing check). [`Bn254Backend`] implements it with arkworks.
//!
//! [`Groth16Verifier`] glues them together around a fixed [`VerificationKey`].

pub mod backend;
pub mod bn254;
pub mod error;
pub mod field;
pub mod groth16;
pub mod snarkjs;
pub mod types;
pub mod verifier;

pub use backend::PairingBackend;
pub use bn254::Bn254Backend;
pub use error::{CurveError, VerificationError};
pub use field::{FieldElement, BASE_FIELD_MODULUS, SCALAR_FIELD_MODULUS};
pub use groth16::Groth16Verifier;
pub use snarkjs::parse_public_inputs;
pub use types::{Fq2Element, G1Point, G2Point, Proof, VerificationKey};
pub use verifier::ProofVerifier;
