//! Response bodies of the remote APIs.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// A ledger URL reference, as found in an account's `authorities` list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

/// Token account state returned by the ledger's `query` method.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccount {
    /// `tokenAccount` or `liteTokenAccount`.
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub authorities: Vec<UrlRef>,
    pub url: String,
    pub token_url: String,
    /// Balance in base units, as a decimal string.
    pub balance: String,
}

impl TokenAccount {
    pub const ACCOUNT_TYPES: [&'static str; 2] = ["tokenAccount", "liteTokenAccount"];

    pub fn validate(&self) -> Result<(), ClientError> {
        if !Self::ACCOUNT_TYPES.contains(&self.account_type.as_str()) {
            return Err(ClientError::InvalidResponse(format!(
                "{} is not a token account (type {:?})",
                self.url, self.account_type
            )));
        }
        for (field, value) in [
            ("url", &self.url),
            ("tokenUrl", &self.token_url),
            ("balance", &self.balance),
        ] {
            if value.is_empty() {
                return Err(ClientError::InvalidResponse(format!(
                    "token account is missing `{field}`"
                )));
            }
        }
        Ok(())
    }
}

/// Token metadata returned by the supply API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    #[serde(default)]
    pub decimals: u32,
    pub total_supply: u64,
    #[serde(default)]
    pub chain_id: u64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TokenInfo {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.address.is_empty() {
            return Err(ClientError::InvalidResponse("token is missing `address`".into()));
        }
        if self.symbol.is_empty() {
            return Err(ClientError::InvalidResponse("token is missing `symbol`".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_account_deserialization() {
        let json = r#"{
            "type": "tokenAccount",
            "authorities": [{"url": "acc://accumulated.acme/book"}],
            "url": "acc://accumulated.acme/staking-rewards",
            "tokenUrl": "acc://ACME",
            "balance": "123456789"
        }"#;
        let account: TokenAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, "tokenAccount");
        assert_eq!(account.token_url, "acc://ACME");
        assert_eq!(account.balance, "123456789");
        assert_eq!(account.authorities.len(), 1);
        assert!(account.validate().is_ok());
    }

    #[test]
    fn non_token_account_fails_validation() {
        let json = r#"{"type": "identity", "url": "acc://x", "tokenUrl": "acc://ACME", "balance": "1"}"#;
        let account: TokenAccount = serde_json::from_str(json).unwrap();
        assert!(matches!(account.validate(), Err(ClientError::InvalidResponse(_))));
    }

    #[test]
    fn empty_balance_fails_validation() {
        let json = r#"{"type": "liteTokenAccount", "url": "acc://x", "tokenUrl": "acc://ACME", "balance": ""}"#;
        let account: TokenAccount = serde_json::from_str(json).unwrap();
        assert!(account.validate().is_err());
    }

    #[test]
    fn token_info_deserialization() {
        let json = r#"{
            "address": "0x7AC168c81F4F3820Fa3F22603ce5864D6aB3C547",
            "symbol": "stACME",
            "decimals": 8,
            "totalSupply": 4200000000000,
            "chainId": 42161,
            "price": 0.031,
            "updatedAt": "2024-05-01T12:00:00Z"
        }"#;
        let token: TokenInfo = serde_json::from_str(json).unwrap();
        assert_eq!(token.total_supply, 4_200_000_000_000);
        assert_eq!(token.chain_id, 42161);
        assert!(token.validate().is_ok());
    }

    #[test]
    fn token_info_without_symbol_fails_validation() {
        let json = r#"{"address": "0xabc", "symbol": "", "totalSupply": 1}"#;
        let token: TokenInfo = serde_json::from_str(json).unwrap();
        assert!(token.validate().is_err());
    }
}
