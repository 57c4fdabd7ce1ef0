//! Token balance in base units.
//!
//! Balances are fixed-point integers: the smallest indivisible unit is one
//! base unit and one whole token is `10^8` base units. All arithmetic on
//! balances stays in integers; the decimal rendering is produced by integer
//! division and remainder so it never picks up floating-point error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Number of decimal places of the native asset.
pub const BASE_UNIT_DECIMALS: u32 = 8;

/// Base units in one whole token (`10^8`).
pub const BASE_UNITS_PER_TOKEN: u64 = 10u64.pow(BASE_UNIT_DECIMALS);

/// A token balance, stored as a count of base units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Balance(u64);

impl Balance {
    pub const ZERO: Self = Self(0);

    pub fn new(base_units: u64) -> Self {
        Self(base_units)
    }

    /// Raw base-unit count.
    pub fn base_units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal numeral of base units.
    ///
    /// Surrounding whitespace is ignored. Signs, fractional parts, empty
    /// input and values that do not fit in a `u64` are rejected.
    pub fn parse(input: &str) -> Result<Self, TypesError> {
        let trimmed = input.trim();
        let invalid = |reason: &str| TypesError::InvalidBalance {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if trimmed.is_empty() {
            return Err(invalid("empty string"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected an unsigned integer of base units"));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|e| invalid(&e.to_string()))
    }

    /// Parse a decimal numeral, coercing anything malformed to zero.
    ///
    /// Callers that need to tell "zero balance" apart from "unreadable
    /// balance" must use [`Balance::parse`] instead.
    pub fn parse_lenient(input: &str) -> Self {
        Self::parse(input).unwrap_or(Self::ZERO)
    }

    /// Human-readable token amount with exactly eight fraction digits.
    ///
    /// `150000000` renders as `"1.50000000"`.
    pub fn human(&self) -> String {
        format!(
            "{}.{:08}",
            self.0 / BASE_UNITS_PER_TOKEN,
            self.0 % BASE_UNITS_PER_TOKEN
        )
    }
}

impl FromStr for Balance {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Balance {
    fn from(base_units: u64) -> Self {
        Self(base_units)
    }
}

/// Displays the exact base-unit integer, as used in transfer payloads.
impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_integer() {
        assert_eq!(Balance::parse("123456789").unwrap(), Balance::new(123_456_789));
        assert_eq!(Balance::parse("0").unwrap(), Balance::ZERO);
        assert_eq!(Balance::parse(" 42\n").unwrap(), Balance::new(42));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "   ", "-5", "+5", "1.5", "1e8", "abc", "12 34"] {
            let err = Balance::parse(bad).unwrap_err();
            assert!(
                matches!(err, TypesError::InvalidBalance { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!(Balance::parse("18446744073709551615").is_ok());
        assert!(Balance::parse("18446744073709551616").is_err());
    }

    #[test]
    fn lenient_parse_coerces_to_zero() {
        assert_eq!(Balance::parse_lenient("not a number"), Balance::ZERO);
        assert_eq!(Balance::parse_lenient("-1"), Balance::ZERO);
        assert_eq!(Balance::parse_lenient("777"), Balance::new(777));
    }

    #[test]
    fn human_always_has_eight_decimals() {
        assert_eq!(Balance::new(123_456_789).human(), "1.23456789");
        assert_eq!(Balance::new(150_000_000).human(), "1.50000000");
        assert_eq!(Balance::new(0).human(), "0.00000000");
        assert_eq!(Balance::new(1).human(), "0.00000001");
        assert_eq!(Balance::new(1_000_000_000_000).human(), "10000.00000000");
    }

    #[test]
    fn display_is_exact_base_units() {
        assert_eq!(Balance::new(800_000_000_000).to_string(), "800000000000");
        assert_eq!(Balance::new(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Balance::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
