//! REST client for token supply metadata.

use serde::Deserialize;
use std::time::Duration;

use crate::error::ClientError;
use crate::source::SupplySource;
use crate::types::TokenInfo;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for `GET {api_url}/tokens/{chain_id}/{address}`.
#[derive(Clone)]
pub struct SupplyClient {
    http: reqwest::Client,
    api_url: String,
}

/// Envelope returned by the supply API: `{"result": {...}}`.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    result: Option<TokenInfo>,
}

impl SupplyClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(DEFAULT_CONNECT_TIMEOUT))
            .build()
            .map_err(|e| ClientError::Client(e.to_string()))?;
        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn token_url(&self, chain_id: u64, token: &str) -> String {
        format!(
            "{}/tokens/{}/{}",
            self.api_url.trim_end_matches('/'),
            chain_id,
            token
        )
    }

    /// Fetch token metadata for `token` on `chain_id`.
    pub async fn get_token(&self, chain_id: u64, token: &str) -> Result<TokenInfo, ClientError> {
        let url = self.token_url(chain_id, token);
        tracing::debug!(%url, "supply api request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if !response.status().is_success() {
            return Err(ClientError::RequestFailed(format!(
                "API request failed with status code {}",
                response.status().as_u16()
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse token response: {e}"))
        })?;
        unwrap_token_response(body)
    }
}

impl SupplySource for SupplyClient {
    async fn token_supply(&self, chain_id: u64, token: &str) -> Result<TokenInfo, ClientError> {
        self.get_token(chain_id, token).await
    }
}

fn unwrap_token_response(body: TokenResponse) -> Result<TokenInfo, ClientError> {
    let token = body
        .result
        .ok_or_else(|| ClientError::InvalidResponse("token response has no result".into()))?;
    token.validate()?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_url_joins_path() {
        let client = SupplyClient::new("https://api.example/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.token_url(42161, "0x7AC168c81F4F3820Fa3F22603ce5864D6aB3C547"),
            "https://api.example/v1/tokens/42161/0x7AC168c81F4F3820Fa3F22603ce5864D6aB3C547"
        );
    }

    #[test]
    fn envelope_is_unwrapped() {
        let body: TokenResponse = serde_json::from_str(
            r#"{"result": {"address": "0xabc", "symbol": "stACME", "totalSupply": 99, "chainId": 1}}"#,
        )
        .unwrap();
        let token = unwrap_token_response(body).unwrap();
        assert_eq!(token.total_supply, 99);
    }

    #[test]
    fn missing_result_is_invalid() {
        let body: TokenResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            unwrap_token_response(body),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
