//! Remote data sources for splitcalc.
//!
//! Two capabilities are consumed, each behind a trait so the run pipeline
//! can be driven by in-memory sources in tests:
//! - [`BalanceSource`] — current balance of a ledger account, as a base-unit
//!   decimal string (`query` over the ledger's JSON-RPC API)
//! - [`SupplySource`] — total issued supply of a token on a given chain
//!   (`GET /tokens/{chainId}/{address}` on the supply REST API)
//!
//! Transport failures, application-level RPC errors and malformed bodies are
//! reported as distinct [`ClientError`] variants. Nothing is retried.

pub mod error;
pub mod ledger;
pub mod source;
pub mod supply;
pub mod types;

pub use error::ClientError;
pub use ledger::LedgerClient;
pub use source::{BalanceSource, SupplySource};
pub use supply::SupplyClient;
pub use types::{TokenAccount, TokenInfo};
