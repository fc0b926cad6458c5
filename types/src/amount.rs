//! Value amounts attached to endorsements.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid floating-point errors.
//! The smallest unit is 1 raw; one whole value unit is [`Value::UNIT`] raw (10^18).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// Number of fractional decimal digits in one whole value unit.
pub const DECIMALS: u32 = 18;

/// An amount of value units, stored as raw units.
///
/// Serializes as a decimal string of whole units (`"0.001"`), which keeps
/// TOML and JSON config files free of 128-bit integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Value(u128);

impl Value {
    pub const ZERO: Self = Self(0);

    /// Raw units in one whole value unit.
    pub const UNIT: u128 = 10u128.pow(DECIMALS);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Parse a decimal amount of whole units, e.g. `"0.001"` or `"25"`.
    pub fn parse_units(s: &str) -> Result<Self, TypesError> {
        let invalid = |why: &str| TypesError::InvalidAmount(format!("{s:?}: {why}"));

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() || (s.contains('.') && frac.is_empty()) {
            return Err(invalid("expected digits on both sides of the decimal point"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("not a decimal number"));
        }
        if frac.len() > DECIMALS as usize {
            return Err(invalid("too many fractional digits"));
        }

        let whole: u128 = whole.parse().map_err(|_| invalid("out of range"))?;
        let frac_raw: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = DECIMALS as usize);
            padded.parse().map_err(|_| invalid("out of range"))?
        };

        whole
            .checked_mul(Self::UNIT)
            .and_then(|w| w.checked_add(frac_raw))
            .map(Self)
            .ok_or_else(|| invalid("out of range"))
    }

    /// Render as a decimal amount of whole units with trailing zeros trimmed.
    pub fn format_units(&self) -> String {
        let whole = self.0 / Self::UNIT;
        let frac = self.0 % Self::UNIT;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{frac:0width$}", width = DECIMALS as usize);
        format!("{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_units())
    }
}

impl TryFrom<String> for Value {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_units(&s)
    }
}

impl From<Value> for String {
    fn from(v: Value) -> Self {
        v.format_units()
    }
}
