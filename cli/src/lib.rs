//! splitcalc — basis-point reward split calculator.
//!
//! Reads a configured set of distributions, fetches each source account's
//! balance (and, for supply-split distributions, the token supply on two
//! chains), allocates the balance by basis points and prints a report plus
//! the `sendTokens` payload for the transfer CLI. Nothing is signed or sent.

pub mod config;
pub mod error;
pub mod run;

pub use config::{
    BalanceParse, CalcConfig, ConfigOverrides, DistributionConfig, SupplyLeg, SupplySplitConfig,
};
pub use error::{ConfigError, RunError};
pub use run::{render, Calculator, DistributionReport, SupplyObservation};
