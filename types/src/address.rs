//! Participant identity: an opaque 20-byte address.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A participant address, rendered as `0x`-prefixed lowercase hex.
///
/// Nothing beyond equality, ordering and hashing is meaningful; the execution
/// environment owns the mapping from keys to addresses.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Participant([u8; 20]);

impl Participant {
    /// Byte length of an address.
    pub const LEN: usize = 20;

    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address whose trailing eight bytes are `n` (big-endian).
    ///
    /// Handy for tests and genesis fixtures: `from_low_u64(1)` is `0x00…01`.
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Participant({self})")
    }
}

impl FromStr for Participant {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits).map_err(|e| TypesError::InvalidAddress(format!("{s}: {e}")))?;
        let bytes: [u8; 20] = raw.try_into().map_err(|v: Vec<u8>| {
            TypesError::InvalidAddress(format!("{s}: expected 20 bytes, got {}", v.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for Participant {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Participant> for String {
    fn from(p: Participant) -> Self {
        p.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed_lowercase_hex() {
        let p = Participant::from_low_u64(0xab);
        assert_eq!(p.to_string(), "0x00000000000000000000000000000000000000ab");
    }

    #[test]
    fn debug_distinguishes_low_addresses() {
        let one = format!("{:?}", Participant::from_low_u64(1));
        let two = format!("{:?}", Participant::from_low_u64(2));
        assert_ne!(one, two);
        assert_eq!(one, "Participant(0x0000000000000000000000000000000000000001)");
    }

    #[test]
    fn parse_with_and_without_prefix() {
        let a: Participant = "0x00000000000000000000000000000000000000ab".parse().unwrap();
        let b: Participant = "00000000000000000000000000000000000000AB".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Participant::from_low_u64(0xab));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("0x1234".parse::<Participant>().is_err());
        assert!("0x".parse::<Participant>().is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!("0xzz000000000000000000000000000000000000ab"
            .parse::<Participant>()
            .is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let p = Participant::from_low_u64(7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, format!("\"{p}\""));
        let back: Participant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
