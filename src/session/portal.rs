// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP bridge to the passkey portal and the paymaster.
//!
//! ## Connect
//!
//! 1. `POST {portal}/api/v1/connect` starts a passkey ceremony and returns a
//!    `request_id` plus the `approval_url` the user opens on their device.
//! 2. `GET {portal}/api/v1/connect/{request_id}` is polled until the ceremony
//!    is `approved`, `rejected` or `expired`, or the connect timeout elapses.
//!
//! ## Sign and send
//!
//! `POST {paymaster}/api/v1/sign-and-send` carries the instructions, the
//! smart wallet, the passkey credential and the fee token. The paymaster
//! collects the passkey signature, pays the SOL fee, charges the fee token
//! and broadcasts. The response holds the transaction signature.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::{
    ConnectionState, SessionError, SessionStore, SignAndSendRequest, TransactionOptions,
    WalletInfo, WalletSession,
};
use crate::blockchain::{parse_address, WireInstruction};
use crate::config::AppConfig;

/// Interval between ceremony status polls.
const CONNECT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Timeout for individual HTTP calls to the portal and paymaster.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Name the portal shows on the approval screen.
const APP_NAME: &str = "passkey-gasless-demo";

#[derive(Debug, Serialize)]
struct StartConnectBody<'a> {
    app: &'a str,
}

#[derive(Debug, Deserialize)]
struct StartConnectResponse {
    request_id: String,
    approval_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CeremonyStatus {
    Pending,
    Approved {
        smart_wallet: String,
        credential_id: Option<String>,
    },
    Rejected {
        reason: Option<String>,
    },
    Expired,
}

#[derive(Debug, Serialize)]
struct SignAndSendBody<'a> {
    smart_wallet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    credential_id: Option<&'a str>,
    rpc_url: &'a str,
    instructions: Vec<WireInstruction>,
    transaction_options: &'a TransactionOptions,
}

#[derive(Debug, Deserialize)]
struct SignAndSendResponse {
    signature: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// [`WalletSession`] backed by the passkey portal and paymaster services.
pub struct PortalSession {
    portal_url: Url,
    paymaster_url: Url,
    rpc_url: Url,
    connect_timeout: Duration,
    poll_interval: Duration,
    store: SessionStore,
    http: Client,
}

impl PortalSession {
    /// Create a session from the startup configuration.
    pub fn new(config: &AppConfig) -> Result<Self, SessionError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| SessionError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            portal_url: config.portal_url.clone(),
            paymaster_url: config.paymaster_url.clone(),
            rpc_url: config.rpc_url.clone(),
            connect_timeout: config.connect_timeout,
            poll_interval: CONNECT_POLL_INTERVAL,
            store: SessionStore::new(),
            http,
        })
    }

    /// Override the ceremony poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn endpoint(base: &Url, path: &str) -> Result<Url, SessionError> {
        let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| SessionError::Provider(format!("invalid endpoint: {e}")))
    }

    async fn start_ceremony(&self) -> Result<StartConnectResponse, SessionError> {
        let url = Self::endpoint(&self.portal_url, "api/v1/connect")?;
        let response = self
            .http
            .post(url)
            .json(&StartConnectBody { app: APP_NAME })
            .send()
            .await
            .map_err(transport_error)?;

        parse_json(response).await
    }

    async fn poll_ceremony(&self, request_id: &str) -> Result<WalletInfo, SessionError> {
        let url = Self::endpoint(&self.portal_url, &format!("api/v1/connect/{request_id}"))?;

        loop {
            let response = self
                .http
                .get(url.clone())
                .send()
                .await
                .map_err(transport_error)?;

            match parse_json::<CeremonyStatus>(response).await? {
                CeremonyStatus::Pending => {
                    debug!(request_id, "Passkey ceremony pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
                CeremonyStatus::Approved {
                    smart_wallet,
                    credential_id,
                } => {
                    let smart_wallet = parse_address(&smart_wallet)
                        .map_err(|e| SessionError::Provider(e.to_string()))?;
                    return Ok(WalletInfo {
                        smart_wallet,
                        credential_id,
                    });
                }
                CeremonyStatus::Rejected { reason } => {
                    return Err(SessionError::Rejected(
                        reason.unwrap_or_else(|| "User rejected".to_string()),
                    ));
                }
                CeremonyStatus::Expired => return Err(SessionError::Timeout),
            }
        }
    }

    async fn run_connect(&self) -> Result<WalletInfo, SessionError> {
        let started = self.start_ceremony().await?;
        info!(
            request_id = %started.request_id,
            approval_url = ?started.approval_url,
            "Passkey ceremony started, waiting for approval"
        );

        tokio::time::timeout(self.connect_timeout, self.poll_ceremony(&started.request_id))
            .await
            .map_err(|_| SessionError::Timeout)?
    }
}

#[async_trait]
impl WalletSession for PortalSession {
    fn state(&self) -> ConnectionState {
        self.store.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.store.subscribe()
    }

    async fn connect(&self) -> Result<WalletInfo, SessionError> {
        let Some(attempt) = self.store.attempt_connect() else {
            return match self.store.snapshot() {
                ConnectionState::Connected(wallet) => Ok(wallet),
                _ => Err(SessionError::Provider(
                    "A connection attempt is already in progress".to_string(),
                )),
            };
        };

        // Dropping `attempt` on error or cancellation resets to Disconnected
        match self.run_connect().await {
            Ok(wallet) => {
                info!(smart_wallet = %wallet.smart_wallet, "Smart wallet connected");
                attempt.succeed(wallet.clone());
                Ok(wallet)
            }
            Err(e) => {
                warn!(error = %e, "Smart wallet connection failed");
                Err(e)
            }
        }
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        if let Some(wallet) = self.store.snapshot().wallet() {
            info!(smart_wallet = %wallet.smart_wallet, "Smart wallet disconnected");
        }
        self.store.set_disconnected();
        Ok(())
    }

    async fn sign_and_send(&self, request: SignAndSendRequest) -> Result<String, SessionError> {
        let wallet = self
            .store
            .snapshot()
            .wallet()
            .cloned()
            .ok_or(SessionError::NotConnected)?;

        let body = SignAndSendBody {
            smart_wallet: wallet.smart_wallet.to_string(),
            credential_id: wallet.credential_id.as_deref(),
            rpc_url: self.rpc_url.as_str(),
            instructions: request.instructions.iter().map(WireInstruction::from).collect(),
            transaction_options: &request.transaction_options,
        };

        let url = Self::endpoint(&self.paymaster_url, "api/v1/sign-and-send")?;
        let idempotency_key = Uuid::new_v4().to_string();
        debug!(
            instructions = body.instructions.len(),
            idempotency_key = %idempotency_key,
            "Submitting instructions to paymaster"
        );

        let response = self
            .http
            .post(url)
            .header("Idempotency-Key", idempotency_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let sent: SignAndSendResponse = parse_json(response).await?;
        Ok(sent.signature)
    }
}

fn transport_error(e: reqwest::Error) -> SessionError {
    SessionError::Transport(e.to_string())
}

/// Decode a success body, or turn the `{ "error": ... }` body of a failed
/// call into a provider error.
async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, SessionError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| SessionError::Provider(format!("invalid provider response: {e}")));
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| format!("HTTP {status}: {text}"));

    if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::UNAUTHORIZED {
        Err(SessionError::Rejected(message))
    } else {
        Err(SessionError::Provider(message))
    }
}
