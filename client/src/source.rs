//! Source traits consumed by the run pipeline.

use crate::error::ClientError;
use crate::types::TokenInfo;

/// Supplies the current balance of a ledger account.
#[allow(async_fn_in_trait)]
pub trait BalanceSource {
    /// Balance of `account` as a decimal string of base units.
    async fn account_balance(&self, account: &str) -> Result<String, ClientError>;
}

/// Supplies token metadata, including total issued supply.
#[allow(async_fn_in_trait)]
pub trait SupplySource {
    async fn token_supply(&self, chain_id: u64, token: &str) -> Result<TokenInfo, ClientError>;
}
