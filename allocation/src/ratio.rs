//! Share pairs derived from two observed supplies.
//!
//! `first = round(budget × X / (X + Y))`, `second = budget − first`.
//! Assigning the second share as the complement keeps the pair summing to
//! `budget` whatever the floating-point ratio rounds to.

use serde::{Deserialize, Serialize};
use splitcalc_types::Bps;

use crate::error::AllocationError;

/// How the first share of a complement pair is rounded to whole bps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioRounding {
    /// Round half away from zero.
    #[default]
    Nearest,
    /// Drop the fractional part, as the historical calculator did.
    Truncate,
}

/// Fraction of the combined supply held by `x`, in `[0, 1]`.
pub fn supply_fraction(x: u64, y: u64) -> Result<f64, AllocationError> {
    if x == 0 && y == 0 {
        return Err(AllocationError::EmptySupply);
    }
    Ok(x as f64 / (x as f64 + y as f64))
}

/// Split `budget` between two sides in proportion to `x : y`.
pub fn complement_pair(
    budget: Bps,
    x: u64,
    y: u64,
    rounding: RatioRounding,
) -> Result<(Bps, Bps), AllocationError> {
    let fraction = supply_fraction(x, y)?;
    let scaled = budget.get() as f64 * fraction;
    let rounded = match rounding {
        RatioRounding::Nearest => scaled.round(),
        RatioRounding::Truncate => scaled.trunc(),
    };
    let first = (rounded as u32).min(budget.get());
    let second = budget.get() - first;
    Ok((Bps::new(first)?, Bps::new(second)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bps(v: u32) -> Bps {
        Bps::new(v).unwrap()
    }

    #[test]
    fn even_supplies_split_evenly() {
        let (a, b) = complement_pair(bps(8000), 500, 500, RatioRounding::Nearest).unwrap();
        assert_eq!((a.get(), b.get()), (4000, 4000));
    }

    #[test]
    fn rounding_modes_differ_on_fractional_share() {
        // 8000 × 2/3 = 5333.33…, 8000 × 1/3 = 2666.66…
        let (a, b) = complement_pair(bps(8000), 1, 2, RatioRounding::Nearest).unwrap();
        assert_eq!((a.get(), b.get()), (2667, 5333));
        let (a, b) = complement_pair(bps(8000), 1, 2, RatioRounding::Truncate).unwrap();
        assert_eq!((a.get(), b.get()), (2666, 5334));
    }

    #[test]
    fn one_sided_supply_takes_whole_budget() {
        let (a, b) = complement_pair(bps(8000), 42, 0, RatioRounding::Nearest).unwrap();
        assert_eq!((a.get(), b.get()), (8000, 0));
        let (a, b) = complement_pair(bps(8000), 0, 42, RatioRounding::Nearest).unwrap();
        assert_eq!((a.get(), b.get()), (0, 8000));
    }

    #[test]
    fn empty_supply_is_an_error() {
        assert!(matches!(
            complement_pair(bps(8000), 0, 0, RatioRounding::Nearest),
            Err(AllocationError::EmptySupply)
        ));
        assert!(supply_fraction(0, 0).is_err());
    }

    #[test]
    fn supply_fraction_of_known_ratio() {
        let f = supply_fraction(1, 3).unwrap();
        assert!((f - 0.25).abs() < f64::EPSILON);
    }
}
