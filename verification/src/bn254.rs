//! [`PairingBackend`] over arkworks' BN254.

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInt, One, PrimeField};

use crate::backend::PairingBackend;
use crate::error::CurveError;
use crate::field::FieldElement;
use crate::types::{Fq2Element, G1Point, G2Point};

/// BN254 (alt_bn128) arithmetic via `ark-bn254`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bn254Backend;

impl Bn254Backend {
    pub fn new() -> Self {
        Self
    }
}

fn fq(e: &FieldElement) -> Result<Fq, CurveError> {
    Fq::from_bigint(BigInt::new(e.to_limbs())).ok_or(CurveError::CoordinateOutOfRange)
}

fn fr(e: &FieldElement) -> Result<Fr, CurveError> {
    Fr::from_bigint(BigInt::new(e.to_limbs())).ok_or(CurveError::ScalarOutOfRange)
}

fn fq_to_element(f: &Fq) -> FieldElement {
    FieldElement::from_limbs(f.into_bigint().0)
}

fn fq2(e: &Fq2Element) -> Result<Fq2, CurveError> {
    Ok(Fq2::new(fq(&e.c0)?, fq(&e.c1)?))
}

pub(crate) fn to_g1(p: &G1Point) -> Result<G1Affine, CurveError> {
    if p.is_identity() {
        return Ok(G1Affine::identity());
    }
    let point = G1Affine::new_unchecked(fq(&p.x)?, fq(&p.y)?);
    if !point.is_on_curve() {
        return Err(CurveError::NotOnCurve);
    }
    // G1 has cofactor 1, so on-curve is sufficient.
    Ok(point)
}

pub(crate) fn to_g2(p: &G2Point) -> Result<G2Affine, CurveError> {
    if p.is_identity() {
        return Ok(G2Affine::identity());
    }
    let point = G2Affine::new_unchecked(fq2(&p.x)?, fq2(&p.y)?);
    if !point.is_on_curve() {
        return Err(CurveError::NotOnCurve);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CurveError::NotInSubgroup);
    }
    Ok(point)
}

pub(crate) fn from_g1(p: &G1Affine) -> G1Point {
    if p.infinity {
        return G1Point::IDENTITY;
    }
    G1Point::new(fq_to_element(&p.x), fq_to_element(&p.y))
}

pub(crate) fn from_g2(p: &G2Affine) -> G2Point {
    if p.infinity {
        return G2Point::default();
    }
    G2Point::new(
        Fq2Element::new(fq_to_element(&p.x.c0), fq_to_element(&p.x.c1)),
        Fq2Element::new(fq_to_element(&p.y.c0), fq_to_element(&p.y.c1)),
    )
}

impl PairingBackend for Bn254Backend {
    fn g1_add(&self, p: &G1Point, q: &G1Point) -> Result<G1Point, CurveError> {
        let sum = to_g1(p)?.into_group() + to_g1(q)?.into_group();
        Ok(from_g1(&sum.into_affine()))
    }

    fn g1_mul(&self, p: &G1Point, scalar: &FieldElement) -> Result<G1Point, CurveError> {
        let product = to_g1(p)?.into_group() * fr(scalar)?;
        Ok(from_g1(&product.into_affine()))
    }

    fn g1_negate(&self, p: &G1Point) -> Result<G1Point, CurveError> {
        Ok(from_g1(&-to_g1(p)?))
    }

    fn pairing_check(&self, pairs: &[(G1Point, G2Point)]) -> Result<bool, CurveError> {
        let mut g1 = Vec::with_capacity(pairs.len());
        let mut g2 = Vec::with_capacity(pairs.len());
        for (a, b) in pairs {
            g1.push(to_g1(a)?);
            g2.push(to_g2(b)?);
        }
        Ok(Bn254::multi_pairing(g1, g2).0.is_one())
    }
}
