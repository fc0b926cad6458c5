//! 256-bit field elements as they appear in calldata and snarkjs output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VerificationError;

/// BN254 scalar field modulus `r` (public inputs and scalars must be below it).
pub const SCALAR_FIELD_MODULUS: FieldElement = FieldElement([
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x28, 0x33, 0xe8, 0x48, 0x79, 0xb9, 0x70, 0x91, 0x43, 0xe1, 0xf5, 0x93, 0xf0, 0x00, 0x00, 0x01,
]);

/// BN254 base field modulus `q` (point coordinates must be below it).
pub const BASE_FIELD_MODULUS: FieldElement = FieldElement([
    0x30, 0x64, 0x4e, 0x72, 0xe1, 0x31, 0xa0, 0x29, 0xb8, 0x50, 0x45, 0xb6, 0x81, 0x81, 0x58, 0x5d,
    0x97, 0x81, 0x6a, 0x91, 0x68, 0x71, 0xca, 0x8d, 0x3c, 0x20, 0x8c, 0x16, 0xd8, 0x7c, 0xfd, 0x47,
]);

/// An unsigned 256-bit integer, stored big-endian.
///
/// Ordering is numeric. Parsed from decimal (`"123"`) or `0x`-prefixed hex;
/// serialized as `0x`-prefixed hex.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldElement([u8; 32]);

impl FieldElement {
    pub const ZERO: Self = Self([0u8; 32]);

    pub const ONE: Self = Self::from_u64(1);

    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn from_u64(n: u64) -> Self {
        let b = n.to_be_bytes();
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = b[i];
            i += 1;
        }
        Self(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Whether this value is a valid BN254 scalar (below `r`).
    pub fn is_scalar(&self) -> bool {
        *self < SCALAR_FIELD_MODULUS
    }

    /// Whether this value is a valid BN254 base-field coordinate (below `q`).
    pub fn is_coordinate(&self) -> bool {
        *self < BASE_FIELD_MODULUS
    }

    /// Little-endian 64-bit limbs, least significant first.
    pub fn to_limbs(&self) -> [u64; 4] {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let end = 32 - i * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&self.0[end - 8..end]);
            *limb = u64::from_be_bytes(word);
        }
        limbs
    }

    pub fn from_limbs(limbs: [u64; 4]) -> Self {
        let mut bytes = [0u8; 32];
        for (i, limb) in limbs.iter().enumerate() {
            let end = 32 - i * 8;
            bytes[end - 8..end].copy_from_slice(&limb.to_be_bytes());
        }
        Self(bytes)
    }

    fn parse_decimal(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut limbs = [0u64; 4];
        for digit in s.bytes().map(|b| u64::from(b - b'0')) {
            let mut carry = digit as u128;
            for limb in limbs.iter_mut() {
                let wide = (*limb as u128) * 10 + carry;
                *limb = wide as u64;
                carry = wide >> 64;
            }
            if carry != 0 {
                return None;
            }
        }
        Some(Self::from_limbs(limbs))
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if digits.is_empty() || digits.len() > 64 {
            return None;
        }
        let padded = format!("{digits:0>64}");
        let raw = hex::decode(padded).ok()?;
        let bytes: [u8; 32] = raw.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl FromStr for FieldElement {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(digits) => Self::parse_hex(digits),
            None => Self::parse_decimal(s),
        };
        parsed.ok_or_else(|| VerificationError::InvalidFieldElement(s.to_owned()))
    }
}

impl TryFrom<String> for FieldElement {
    type Error = VerificationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FieldElement> for String {
    fn from(e: FieldElement) -> Self {
        e.to_string()
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_moduli_match_constants() {
        let r: FieldElement =
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                .parse()
                .unwrap();
        let q: FieldElement =
            "21888242871839275222246405745257275088696311157297823662689037894645226208583"
                .parse()
                .unwrap();
        assert_eq!(r, SCALAR_FIELD_MODULUS);
        assert_eq!(q, BASE_FIELD_MODULUS);
    }

    #[test]
    fn debug_shows_every_byte() {
        assert_ne!(format!("{:?}", FieldElement::ZERO), format!("{:?}", FieldElement::ONE));
        assert!(format!("{:?}", FieldElement::ONE).ends_with("01)"));
    }

    #[test]
    fn hex_and_decimal_agree() {
        let a: FieldElement = "0x0000000000000000000000000000000000000000000000000000000000000001"
            .parse()
            .unwrap();
        let b: FieldElement = "1".parse().unwrap();
        let c: FieldElement = "0x1".parse().unwrap();
        assert_eq!(a, FieldElement::ONE);
        assert_eq!(b, FieldElement::ONE);
        assert_eq!(c, FieldElement::ONE);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "0x", "12a", "-1", "0xgg", " 1"] {
            assert!(bad.parse::<FieldElement>().is_err(), "{bad:?} should be rejected");
        }
        let too_long = format!("0x1{}", "0".repeat(64));
        assert!(too_long.parse::<FieldElement>().is_err());
    }

    #[test]
    fn rejects_decimal_overflow() {
        // 2^256
        let overflow =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(overflow.parse::<FieldElement>().is_err());
        let max = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(max.parse::<FieldElement>().unwrap().to_be_bytes(), [0xff; 32]);
    }

    #[test]
    fn field_membership() {
        assert!(FieldElement::ONE.is_scalar());
        assert!(!SCALAR_FIELD_MODULUS.is_scalar());
        assert!(SCALAR_FIELD_MODULUS.is_coordinate());
        assert!(!BASE_FIELD_MODULUS.is_coordinate());
    }

    #[test]
    fn limbs_roundtrip_through_bytes() {
        let e: FieldElement = "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20"
            .parse()
            .unwrap();
        assert_eq!(e.to_limbs()[0], 0x191a1b1c1d1e1f20);
        assert_eq!(e.to_limbs()[3], 0x0102030405060708);
        assert_eq!(FieldElement::from_limbs(e.to_limbs()), e);
    }
}
