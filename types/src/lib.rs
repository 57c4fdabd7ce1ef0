//! Fundamental types for splitcalc.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: base-unit balances, basis-point shares and destination accounts.

pub mod address;
pub mod amount;
pub mod error;
pub mod share;

pub use address::Destination;
pub use amount::{Balance, BASE_UNIT_DECIMALS, BASE_UNITS_PER_TOKEN};
pub use error::TypesError;
pub use share::{Bps, BPS_DENOMINATOR};
