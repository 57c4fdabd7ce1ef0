//! JSON-RPC client for the ledger's account-state API.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ClientError;
use crate::source::BalanceSource;
use crate::types::TokenAccount;

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound for establishing a connection.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the ledger's JSON-RPC 2.0 endpoint.
///
/// Sends `{"method": "query", "params": {"url": <account>}}` to the configured
/// URL and validates that the account is a token account.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Serialize)]
struct QueryParams<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryTokenAccountResponse {
    data: Option<TokenAccount>,
}

impl LedgerClient {
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

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Send a JSON-RPC request and return its `result`.
    async fn call<P: Serialize>(
        &self,
        method: &str,
        params: P,
    ) -> Result<serde_json::Value, ClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        tracing::debug!(url = %self.api_url, method, "ledger rpc call");

        let response = self
            .http
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if !response.status().is_success() {
            return Err(ClientError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body: RpcResponse = response.json().await.map_err(|e| {
            ClientError::InvalidResponse(format!("failed to parse JSON-RPC response: {e}"))
        })?;
        unwrap_rpc_response(body)
    }

    /// Query a token account.
    pub async fn query_token_account(&self, account: &str) -> Result<TokenAccount, ClientError> {
        let result = self.call("query", QueryParams { url: account }).await?;
        parse_token_account(result)
    }
}

impl BalanceSource for LedgerClient {
    async fn account_balance(&self, account: &str) -> Result<String, ClientError> {
        Ok(self.query_token_account(account).await?.balance)
    }
}

fn unwrap_rpc_response(body: RpcResponse) -> Result<serde_json::Value, ClientError> {
    if let Some(err) = body.error {
        return Err(ClientError::Rpc {
            code: err.code,
            message: err.message,
        });
    }
    body.result
        .ok_or_else(|| ClientError::InvalidResponse("JSON-RPC response has no result".into()))
}

fn parse_token_account(result: serde_json::Value) -> Result<TokenAccount, ClientError> {
    let resp: QueryTokenAccountResponse = serde_json::from_value(result)
        .map_err(|e| ClientError::InvalidResponse(format!("can not unmarshal api response: {e}")))?;
    let account = resp
        .data
        .ok_or_else(|| ClientError::InvalidResponse("query response has no data".into()))?;
    account.validate()?;
    Ok(account)
}
