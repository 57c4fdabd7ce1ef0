//! Nullable infrastructure for deterministic testing.
//!
//! The run pipeline talks to the outside world only through the
//! [`BalanceSource`](splitcalc_client::BalanceSource) and
//! [`SupplySource`](splitcalc_client::SupplySource) traits. This crate
//! provides in-memory implementations that:
//! - Return programmed values
//! - Record every request for assertions
//! - Never touch the network
//!
//! Usage: swap the HTTP clients for nullables in tests.

pub mod ledger;
pub mod supply;

pub use ledger::NullLedger;
pub use supply::NullSupply;

/// A programmed failure for a nullable source.
#[derive(Clone, Debug)]
pub(crate) enum Failure {
    Unreachable(String),
    Rpc { code: i64, message: String },
}

impl Failure {
    pub(crate) fn to_error(&self) -> splitcalc_client::ClientError {
        use splitcalc_client::ClientError;
        match self {
            Failure::Unreachable(msg) => ClientError::Unreachable(msg.clone()),
            Failure::Rpc { code, message } => ClientError::Rpc {
                code: *code,
                message: message.clone(),
            },
        }
    }
}
