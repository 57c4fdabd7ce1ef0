//! Nullable supply API — programmed token supplies.

use splitcalc_client::{ClientError, SupplySource, TokenInfo};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Failure;

/// A test supply source keyed by `(chain_id, token)`.
pub struct NullSupply {
    replies: RefCell<HashMap<(u64, String), Result<u64, Failure>>>,
    queried: RefCell<Vec<(u64, String)>>,
}

impl NullSupply {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(HashMap::new()),
            queried: RefCell::new(Vec::new()),
        }
    }

    pub fn with_supply(self, chain_id: u64, token: &str, total_supply: u64) -> Self {
        self.replies
            .borrow_mut()
            .insert((chain_id, token.to_string()), Ok(total_supply));
        self
    }

    pub fn with_unreachable(self, chain_id: u64, token: &str, message: &str) -> Self {
        self.replies.borrow_mut().insert(
            (chain_id, token.to_string()),
            Err(Failure::Unreachable(message.to_string())),
        );
        self
    }

    /// `(chain_id, token)` pairs queried so far, in order.
    pub fn queried(&self) -> Vec<(u64, String)> {
        self.queried.borrow().clone()
    }
}

impl Default for NullSupply {
    fn default() -> Self {
        Self::new()
    }
}

impl SupplySource for NullSupply {
    async fn token_supply(&self, chain_id: u64, token: &str) -> Result<TokenInfo, ClientError> {
        let key = (chain_id, token.to_string());
        self.queried.borrow_mut().push(key.clone());
        match self.replies.borrow().get(&key) {
            Some(Ok(total_supply)) => Ok(TokenInfo {
                address: token.to_string(),
                symbol: "TOKEN".to_string(),
                decimals: 8,
                total_supply: *total_supply,
                chain_id,
                price: 0.0,
                updated_at: None,
            }),
            Some(Err(failure)) => Err(failure.to_error()),
            None => Err(ClientError::RequestFailed(
                "API request failed with status code 404".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn programmed_supply_is_returned() {
        let supply = NullSupply::new().with_supply(1, "0xabc", 500);
        let token = supply.token_supply(1, "0xabc").await.unwrap();
        assert_eq!(token.total_supply, 500);
        assert_eq!(token.chain_id, 1);
        assert_eq!(supply.queried(), vec![(1, "0xabc".to_string())]);
    }

    #[tokio::test]
    async fn unknown_token_is_a_request_failure() {
        let supply = NullSupply::new();
        assert!(matches!(
            supply.token_supply(10, "0xabc").await,
            Err(ClientError::RequestFailed(_))
        ));
    }
}
