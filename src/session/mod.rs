// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Session
//!
//! The session is the capability boundary to the passkey wallet provider.
//! Components receive it explicitly as `Arc<dyn WalletSession>`; nothing
//! reaches it through global state.
//!
//! ## Contract
//!
//! - `state()` / `subscribe()` expose the connection lifecycle
//!   (`Disconnected` → `Connecting` → `Connected`), backed by a
//!   [`SessionStore`].
//! - `connect()` runs the passkey ceremony; on failure the state returns to
//!   `Disconnected`.
//! - `disconnect()` clears the active session only. The passkey itself is
//!   never touched.
//! - `sign_and_send()` authorizes a list of instructions with the passkey and
//!   submits them through the paymaster, returning the transaction signature.

use async_trait::async_trait;
use serde::Serialize;
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use tokio::sync::watch;

use crate::blockchain::FeeToken;

pub mod portal;
pub mod store;
#[cfg(test)]
pub(crate) mod testing;

pub use portal::PortalSession;
pub use store::{ConnectAttempt, SessionStore};

/// Metadata of the connected smart wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    /// On-chain smart wallet address.
    pub smart_wallet: Pubkey,
    /// Passkey credential id returned by the portal, if any.
    pub credential_id: Option<String>,
}

impl WalletInfo {
    pub fn new(smart_wallet: Pubkey) -> Self {
        Self {
            smart_wallet,
            credential_id: None,
        }
    }
}

/// Connection lifecycle of a wallet session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected(WalletInfo),
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    pub fn wallet(&self) -> Option<&WalletInfo> {
        match self {
            ConnectionState::Connected(wallet) => Some(wallet),
            _ => None,
        }
    }

    /// Short status name used in API responses and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected(_) => "connected",
        }
    }
}

/// Options forwarded with a sign-and-send call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionOptions {
    /// Token the paymaster charges fees in. `None` pays fees in SOL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_token: Option<FeeToken>,
}

/// Instructions to execute through the smart wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct SignAndSendRequest {
    pub instructions: Vec<Instruction>,
    pub transaction_options: TransactionOptions,
}

/// Errors surfaced by the wallet provider.
///
/// Provider messages are displayed verbatim so the UI shows exactly what the
/// portal or paymaster reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Wallet not connected.")]
    NotConnected,

    #[error("{0}")]
    Rejected(String),

    #[error("Passkey approval timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    Provider(String),
}

/// Capability to drive a passkey smart wallet session.
#[async_trait]
pub trait WalletSession: Send + Sync {
    /// Current connection state.
    fn state(&self) -> ConnectionState;

    /// Subscribe to connection state changes.
    fn subscribe(&self) -> watch::Receiver<ConnectionState>;

    /// Run the passkey ceremony and connect the smart wallet.
    async fn connect(&self) -> Result<WalletInfo, SessionError>;

    /// End the current session.
    async fn disconnect(&self) -> Result<(), SessionError>;

    /// Sign the instructions with the passkey and submit them.
    async fn sign_and_send(&self, request: SignAndSendRequest) -> Result<String, SessionError>;
}
