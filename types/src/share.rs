//! Basis-point shares.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// Basis points in a whole (100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// A share of a whole expressed in basis points, in `[0, 10000]`.
///
/// Deserialization goes through [`Bps::new`], so an out-of-range value in a
/// config file is rejected at load time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Bps(u16);

impl Bps {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(BPS_DENOMINATOR as u16);

    pub fn new(bps: u32) -> Result<Self, TypesError> {
        if bps > BPS_DENOMINATOR {
            return Err(TypesError::ShareOutOfRange(bps));
        }
        Ok(Self(bps as u16))
    }

    pub fn get(&self) -> u32 {
        self.0 as u32
    }

    /// Whole percent, rounded down (`1250` bps is `12`).
    pub fn whole_percent(&self) -> u32 {
        self.get() / 100
    }
}

impl TryFrom<u32> for Bps {
    type Error = TypesError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Bps> for u32 {
    fn from(bps: Bps) -> Self {
        bps.get()
    }
}

impl fmt::Display for Bps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.0)
    }
}
