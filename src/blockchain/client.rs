// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Minimal Solana JSON-RPC client used for readiness checks.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

/// Solana JSON-RPC client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    rpc_url: Url,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    message: String,
}

impl RpcClient {
    /// Create a new client for the given endpoint.
    pub fn new(rpc_url: Url) -> Result<Self, RpcClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| RpcClientError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { rpc_url, http })
    }

    /// Get the RPC endpoint URL.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Call `getHealth`; succeeds only when the node reports `"ok"`.
    pub async fn get_health(&self) -> Result<(), RpcClientError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getHealth",
        });

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| RpcClientError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RpcClientError::Request(format!(
                "HTTP {} from RPC endpoint",
                response.status()
            )));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcClientError::InvalidResponse(e.to_string()))?;

        match (body.result, body.error) {
            (Some(result), _) if result == "ok" => Ok(()),
            (_, Some(error)) => Err(RpcClientError::Unhealthy(error.message)),
            (Some(other), None) => Err(RpcClientError::Unhealthy(other)),
            (None, None) => Err(RpcClientError::InvalidResponse(
                "missing result in response".to_string(),
            )),
        }
    }
}

/// Errors that can occur talking to the RPC node.
#[derive(Debug, thiserror::Error)]
pub enum RpcClientError {
    #[error("RPC request failed: {0}")]
    Request(String),

    #[error("RPC response was invalid: {0}")]
    InvalidResponse(String),

    #[error("RPC node unhealthy: {0}")]
    Unhealthy(String),
}
