//! Curve arithmetic the Groth16 check is built from.

use crate::error::CurveError;
use crate::field::FieldElement;
use crate::types::{G1Point, G2Point};

/// BN254 operations shaped like the EVM precompiles (`ecAdd`, `ecMul`,
/// `ecPairing`).
///
/// Every method rejects coordinates that are out of range or off the curve
/// instead of silently reducing them.
pub trait PairingBackend: Send + Sync {
    fn g1_add(&self, p: &G1Point, q: &G1Point) -> Result<G1Point, CurveError>;

    /// Scalar multiplication. The scalar must be below the group order.
    fn g1_mul(&self, p: &G1Point, scalar: &FieldElement) -> Result<G1Point, CurveError>;

    fn g1_negate(&self, p: &G1Point) -> Result<G1Point, CurveError>;

    /// Whether the product of `e(g1_i, g2_i)` over all pairs is the identity
    /// in GT. An empty list is trivially true.
    fn pairing_check(&self, pairs: &[(G1Point, G2Point)]) -> Result<bool, CurveError>;
}
