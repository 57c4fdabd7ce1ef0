//! Errors raised while constructing the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid balance {input:?}: {reason}")]
    InvalidBalance { input: String, reason: String },

    #[error("share of {0} bps exceeds the maximum of 10000 bps")]
    ShareOutOfRange(u32),

    #[error("destination must not be empty")]
    EmptyDestination,
}
