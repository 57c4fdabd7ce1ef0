//! Nullable ledger — programmed account balances.

use splitcalc_client::{BalanceSource, ClientError};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Failure;

/// A test balance source that answers from an in-memory table.
///
/// Unknown accounts are answered with an RPC "not found" error.
pub struct NullLedger {
    replies: RefCell<HashMap<String, Result<String, Failure>>>,
    queried: RefCell<Vec<String>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(HashMap::new()),
            queried: RefCell::new(Vec::new()),
        }
    }

    /// Answer `account` with `balance` (a raw decimal string, possibly malformed).
    pub fn with_balance(self, account: &str, balance: impl Into<String>) -> Self {
        self.replies
            .borrow_mut()
            .insert(account.to_string(), Ok(balance.into()));
        self
    }

    /// Make queries for `account` fail as if the endpoint were down.
    pub fn with_unreachable(self, account: &str, message: &str) -> Self {
        self.replies.borrow_mut().insert(
            account.to_string(),
            Err(Failure::Unreachable(message.to_string())),
        );
        self
    }

    /// Make queries for `account` fail with a JSON-RPC error object.
    pub fn with_rpc_error(self, account: &str, code: i64, message: &str) -> Self {
        self.replies.borrow_mut().insert(
            account.to_string(),
            Err(Failure::Rpc {
                code,
                message: message.to_string(),
            }),
        );
        self
    }

    /// Accounts queried so far, in order.
    pub fn queried(&self) -> Vec<String> {
        self.queried.borrow().clone()
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceSource for NullLedger {
    async fn account_balance(&self, account: &str) -> Result<String, ClientError> {
        self.queried.borrow_mut().push(account.to_string());
        match self.replies.borrow().get(account) {
            Some(Ok(balance)) => Ok(balance.clone()),
            Some(Err(failure)) => Err(failure.to_error()),
            None => Err(ClientError::Rpc {
                code: -33404,
                message: format!("{account} not found"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn programmed_balance_is_returned_and_recorded() {
        let ledger = NullLedger::new().with_balance("acc://a", "150000000");
        assert_eq!(ledger.account_balance("acc://a").await.unwrap(), "150000000");
        assert_eq!(ledger.queried(), vec!["acc://a".to_string()]);
    }

    #[tokio::test]
    async fn unknown_account_is_an_rpc_error() {
        let ledger = NullLedger::new();
        assert!(matches!(
            ledger.account_balance("acc://missing").await,
            Err(ClientError::Rpc { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_failure_is_reported() {
        let ledger = NullLedger::new().with_unreachable("acc://a", "timed out");
        assert!(matches!(
            ledger.account_balance("acc://a").await,
            Err(ClientError::Unreachable(_))
        ));
    }
}
