//! Proof and verification-key shapes.
//!
//! Points are held as raw coordinates; curve membership is checked by the
//! [`PairingBackend`](crate::PairingBackend) when they are used, not here.

use serde::{Deserialize, Serialize};

use crate::error::VerificationError;
use crate::field::FieldElement;

/// An element of the quadratic extension `Fq2 = c0 + c1·u`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fq2Element {
    pub c0: FieldElement,
    pub c1: FieldElement,
}

impl Fq2Element {
    pub const fn new(c0: FieldElement, c1: FieldElement) -> Self {
        Self { c0, c1 }
    }
}

/// Affine point on G1. `(0, 0)` encodes the point at infinity, as the EVM
/// precompiles do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct G1Point {
    pub x: FieldElement,
    pub y: FieldElement,
}

impl G1Point {
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
    };

    pub const fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y }
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

/// Affine point on G2 (the twist over Fq2). All-zero encodes infinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct G2Point {
    pub x: Fq2Element,
    pub y: Fq2Element,
}

impl G2Point {
    pub const fn new(x: Fq2Element, y: Fq2Element) -> Self {
        Self { x, y }
    }

    pub fn is_identity(&self) -> bool {
        self.x == Fq2Element::default() && self.y == Fq2Element::default()
    }
}

/// A Groth16 proof `(A, B, C)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
}

impl Proof {
    pub const fn new(a: G1Point, b: G2Point, c: G1Point) -> Self {
        Self { a, b, c }
    }

    /// Build a proof from the `(a, b, c)` arguments of an EVM Groth16
    /// verifier call. Calldata orders each Fq2 coordinate imaginary part first.
    pub fn from_calldata(
        a: [FieldElement; 2],
        b: [[FieldElement; 2]; 2],
        c: [FieldElement; 2],
    ) -> Self {
        Self {
            a: G1Point::new(a[0], a[1]),
            b: G2Point::new(
                Fq2Element::new(b[0][1], b[0][0]),
                Fq2Element::new(b[1][1], b[1][0]),
            ),
            c: G1Point::new(c[0], c[1]),
        }
    }

    /// Inverse of [`from_calldata`](Self::from_calldata).
    pub fn to_calldata(&self) -> ([FieldElement; 2], [[FieldElement; 2]; 2], [FieldElement; 2]) {
        (
            [self.a.x, self.a.y],
            [[self.b.x.c1, self.b.x.c0], [self.b.y.c1, self.b.y.c0]],
            [self.c.x, self.c.y],
        )
    }
}

/// Groth16 verification key for one circuit.
///
/// `ic` has one point per public input plus the constant term at index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    pub alpha: G1Point,
    pub beta: G2Point,
    pub gamma: G2Point,
    pub delta: G2Point,
    pub ic: Vec<G1Point>,
}

impl VerificationKey {
    pub fn new(
        alpha: G1Point,
        beta: G2Point,
        gamma: G2Point,
        delta: G2Point,
        ic: Vec<G1Point>,
    ) -> Result<Self, VerificationError> {
        if ic.is_empty() {
            return Err(VerificationError::Malformed {
                what: "verification key",
                reason: "IC must contain at least the constant term".into(),
            });
        }
        Ok(Self {
            alpha,
            beta,
            gamma,
            delta,
            ic,
        })
    }

    /// Number of public inputs the circuit expects.
    pub fn public_input_count(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(n: u64) -> FieldElement {
        FieldElement::from_u64(n)
    }

    #[test]
    fn calldata_swaps_fq2_components() {
        let proof = Proof::from_calldata(
            [fe(1), fe(2)],
            [[fe(3), fe(4)], [fe(5), fe(6)]],
            [fe(7), fe(8)],
        );
        assert_eq!(proof.b.x, Fq2Element::new(fe(4), fe(3)));
        assert_eq!(proof.b.y, Fq2Element::new(fe(6), fe(5)));

        let (a, b, c) = proof.to_calldata();
        assert_eq!(a, [fe(1), fe(2)]);
        assert_eq!(b, [[fe(3), fe(4)], [fe(5), fe(6)]]);
        assert_eq!(c, [fe(7), fe(8)]);
    }

    #[test]
    fn key_requires_constant_term() {
        let g2 = G2Point::default();
        let err = VerificationKey::new(G1Point::IDENTITY, g2, g2, g2, vec![]).unwrap_err();
        assert!(matches!(err, VerificationError::Malformed { .. }));

        let vk = VerificationKey::new(G1Point::IDENTITY, g2, g2, g2, vec![G1Point::IDENTITY; 2])
            .unwrap();
        assert_eq!(vk.public_input_count(), 1);
    }

    #[test]
    fn identity_encoding() {
        assert!(G1Point::IDENTITY.is_identity());
        assert!(!G1Point::new(fe(1), fe(2)).is_identity());
        assert!(G2Point::default().is_identity());
    }
}
