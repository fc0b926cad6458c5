//! Decoding of snarkjs `proof.json`, `public.json` and
//! `verification_key.json`.
//!
//! Points come in projective form with a trailing `"1"` (or `["1", "0"]` for
//! G2); anything else in that slot is rejected rather than normalized.

use serde::Deserialize;

use crate::error::VerificationError;
use crate::field::FieldElement;
use crate::types::{Fq2Element, G1Point, G2Point, Proof, VerificationKey};

type RawG1 = Vec<String>;
type RawG2 = Vec<Vec<String>>;

#[derive(Deserialize)]
struct RawProof {
    pi_a: RawG1,
    pi_b: RawG2,
    pi_c: RawG1,
    #[serde(default)]
    protocol: Option<String>,
    #[serde(default)]
    curve: Option<String>,
}

#[derive(Deserialize)]
struct RawVerificationKey {
    protocol: String,
    curve: String,
    #[serde(rename = "nPublic")]
    n_public: usize,
    vk_alpha_1: RawG1,
    vk_beta_2: RawG2,
    vk_gamma_2: RawG2,
    vk_delta_2: RawG2,
    #[serde(rename = "IC")]
    ic: Vec<RawG1>,
}

fn element(s: &str) -> Result<FieldElement, VerificationError> {
    s.parse()
}

fn malformed(what: &'static str, reason: impl Into<String>) -> VerificationError {
    VerificationError::Malformed {
        what,
        reason: reason.into(),
    }
}

fn g1(raw: &[String], what: &'static str) -> Result<G1Point, VerificationError> {
    match raw {
        [x, y] => Ok(G1Point::new(element(x)?, element(y)?)),
        [x, y, z] => {
            let z = element(z)?;
            if z == FieldElement::ONE {
                Ok(G1Point::new(element(x)?, element(y)?))
            } else if z.is_zero() {
                Ok(G1Point::IDENTITY)
            } else {
                Err(malformed(what, "G1 point is not normalized"))
            }
        }
        _ => Err(malformed(what, format!("G1 point has {} coordinates", raw.len()))),
    }
}

fn fq2(raw: &[String], what: &'static str) -> Result<Fq2Element, VerificationError> {
    match raw {
        [c0, c1] => Ok(Fq2Element::new(element(c0)?, element(c1)?)),
        _ => Err(malformed(what, "Fq2 element must have two components")),
    }
}

fn g2(raw: &[Vec<String>], what: &'static str) -> Result<G2Point, VerificationError> {
    let (x, y) = match raw {
        [x, y] => (x, y),
        [x, y, z] => {
            let z = fq2(z, what)?;
            if z == Fq2Element::default() {
                return Ok(G2Point::default());
            }
            if z != Fq2Element::new(FieldElement::ONE, FieldElement::ZERO) {
                return Err(malformed(what, "G2 point is not normalized"));
            }
            (x, y)
        }
        _ => return Err(malformed(what, format!("G2 point has {} coordinates", raw.len()))),
    };
    Ok(G2Point::new(fq2(x, what)?, fq2(y, what)?))
}

impl Proof {
    /// Parse a snarkjs `proof.json`.
    pub fn from_snarkjs_json(json: &str) -> Result<Self, VerificationError> {
        let raw: RawProof = serde_json::from_str(json)?;
        if let Some(protocol) = raw.protocol.as_deref() {
            if protocol != "groth16" {
                return Err(VerificationError::Unsupported {
                    protocol: protocol.to_owned(),
                    curve: raw.curve.unwrap_or_default(),
                });
            }
        }
        Ok(Proof::new(
            g1(&raw.pi_a, "pi_a")?,
            g2(&raw.pi_b, "pi_b")?,
            g1(&raw.pi_c, "pi_c")?,
        ))
    }
}

impl VerificationKey {
    /// Parse a snarkjs `verification_key.json` for a Groth16 BN254 circuit.
    pub fn from_snarkjs_json(json: &str) -> Result<Self, VerificationError> {
        let raw: RawVerificationKey = serde_json::from_str(json)?;
        if raw.protocol != "groth16" || raw.curve != "bn128" {
            return Err(VerificationError::Unsupported {
                protocol: raw.protocol,
                curve: raw.curve,
            });
        }
        if raw.ic.len() != raw.n_public + 1 {
            return Err(VerificationError::IcMismatch {
                declared: raw.n_public,
                ic: raw.ic.len(),
            });
        }
        let ic = raw
            .ic
            .iter()
            .map(|p| g1(p, "IC"))
            .collect::<Result<Vec<_>, _>>()?;
        VerificationKey::new(
            g1(&raw.vk_alpha_1, "vk_alpha_1")?,
            g2(&raw.vk_beta_2, "vk_beta_2")?,
            g2(&raw.vk_gamma_2, "vk_gamma_2")?,
            g2(&raw.vk_delta_2, "vk_delta_2")?,
            ic,
        )
    }
}

/// Parse a snarkjs `public.json` (an array of decimal strings).
pub fn parse_public_inputs(json: &str) -> Result<Vec<FieldElement>, VerificationError> {
    let raw: Vec<String> = serde_json::from_str(json)?;
    raw.iter().map(|s| element(s)).collect()
}
