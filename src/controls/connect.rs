// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Connect / disconnect control.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::session::{ConnectionState, WalletSession};

/// Number of address characters shown on the disconnect button.
const SHORT_ADDRESS_LEN: usize = 6;

/// What a click on the connection button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConnectAction {
    Connect,
    Disconnect,
}

/// Rendered state of the connection button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConnectButtonView {
    /// "disconnected", "connecting" or "connected".
    pub status: String,
    pub label: String,
    pub disabled: bool,
    pub action: ConnectAction,
    /// Full smart wallet address when connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_wallet: Option<String>,
}

impl ConnectButtonView {
    pub fn render(state: &ConnectionState) -> Self {
        match state {
            ConnectionState::Disconnected => Self {
                status: state.as_str().to_string(),
                label: "Connect Wallet".to_string(),
                disabled: false,
                action: ConnectAction::Connect,
                smart_wallet: None,
            },
            ConnectionState::Connecting => Self {
                status: state.as_str().to_string(),
                label: "Connecting...".to_string(),
                disabled: true,
                action: ConnectAction::Connect,
                smart_wallet: None,
            },
            ConnectionState::Connected(wallet) => {
                let address = wallet.smart_wallet.to_string();
                Self {
                    status: state.as_str().to_string(),
                    label: format!("Disconnect {}", short_address(&address)),
                    disabled: false,
                    action: ConnectAction::Disconnect,
                    smart_wallet: Some(address),
                }
            }
        }
    }
}

/// First characters of an address followed by an ellipsis.
pub fn short_address(address: &str) -> String {
    let prefix: String = address.chars().take(SHORT_ADDRESS_LEN).collect();
    format!("{prefix}...")
}

/// View over the session's connection state that drives connect/disconnect.
#[derive(Clone)]
pub struct ConnectControl {
    session: Arc<dyn WalletSession>,
}

impl ConnectControl {
    pub fn new(session: Arc<dyn WalletSession>) -> Self {
        Self { session }
    }

    pub fn view(&self) -> ConnectButtonView {
        ConnectButtonView::render(&self.session.state())
    }

    /// Handle a button press.
    ///
    /// Failures are not handled here: they show up as the session falling back
    /// to `Disconnected`.
    pub async fn click(&self) -> ConnectButtonView {
        match self.session.state() {
            ConnectionState::Disconnected => {
                if let Err(e) = self.session.connect().await {
                    warn!(error = %e, "Connect failed");
                }
            }
            ConnectionState::Connected(_) => {
                if let Err(e) = self.session.disconnect().await {
                    warn!(error = %e, "Disconnect failed");
                }
            }
            // Button is disabled while connecting
            ConnectionState::Connecting => {}
        }
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::RecordingSession;
    use crate::session::{SessionError, WalletInfo};
    use solana_program::pubkey::Pubkey;

    #[test]
    fn renders_each_connection_state() {
        let view = ConnectButtonView::render(&ConnectionState::Disconnected);
        assert_eq!(view.label, "Connect Wallet");
        assert!(!view.disabled);
        assert_eq!(view.action, ConnectAction::Connect);

        let view = ConnectButtonView::render(&ConnectionState::Connecting);
        assert_eq!(view.label, "Connecting...");
        assert!(view.disabled);

        let wallet = Pubkey::new_unique();
        let address = wallet.to_string();
        let view = ConnectButtonView::render(&ConnectionState::Connected(WalletInfo::new(wallet)));
        assert_eq!(view.label, format!("Disconnect {}...", &address[..6]));
        assert_eq!(view.action, ConnectAction::Disconnect);
        assert_eq!(view.smart_wallet.as_deref(), Some(address.as_str()));
    }

    #[test]
    fn short_address_handles_short_input() {
        assert_eq!(short_address("Ab"), "Ab...");
        assert_eq!(short_address("ABCDEFGHIJ"), "ABCDEF...");
    }

    #[tokio::test]
    async fn click_connects_then_disconnects() {
        let session = Arc::new(RecordingSession::new());
        let control = ConnectControl::new(session.clone());

        let view = control.click().await;
        assert_eq!(view.action, ConnectAction::Disconnect);
        assert!(session.state().is_connected());

        let view = control.click().await;
        assert_eq!(view.label, "Connect Wallet");
        assert_eq!(session.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn failed_connect_surfaces_through_session_state() {
        let session = Arc::new(RecordingSession::new());
        session.push_connect(Err(SessionError::Rejected("User rejected".into())));
        let control = ConnectControl::new(session.clone());

        let view = control.click().await;
        assert_eq!(view.label, "Connect Wallet");
        assert!(!view.disabled);
    }

    #[tokio::test]
    async fn click_while_connecting_is_ignored() {
        let session = Arc::new(RecordingSession::new());
        session.store().begin_connect();
        let control = ConnectControl::new(session.clone());

        let view = control.click().await;
        assert!(view.disabled);
        assert_eq!(*session.connect_calls.lock().unwrap(), 0);
    }
}
