// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Connection control endpoints.
//!
//! Connecting runs the passkey ceremony, so the request stays open until the
//! user approves or rejects it. The page polls `/v1/state` in the meantime to
//! show the "Connecting..." button.

use axum::{extract::State, Json};

use crate::{
    controls::{ConnectAction, ConnectButtonView},
    state::AppState,
};

/// Connect the smart wallet.
///
/// No-op when a wallet is already connected or a ceremony is running.
#[utoipa::path(
    post,
    path = "/v1/session/connect",
    tag = "Session",
    responses(
        (status = 200, description = "Connection button after the attempt", body = ConnectButtonView)
    )
)]
pub async fn connect(State(state): State<AppState>) -> Json<ConnectButtonView> {
    press(&state, ConnectAction::Connect).await
}

/// Disconnect the smart wallet. The passkey itself is kept.
#[utoipa::path(
    post,
    path = "/v1/session/disconnect",
    tag = "Session",
    responses(
        (status = 200, description = "Connection button after disconnecting", body = ConnectButtonView)
    )
)]
pub async fn disconnect(State(state): State<AppState>) -> Json<ConnectButtonView> {
    press(&state, ConnectAction::Disconnect).await
}

/// Click the button only if it currently performs `wanted`.
async fn press(state: &AppState, wanted: ConnectAction) -> Json<ConnectButtonView> {
    let view = state.connect.view();
    if view.disabled || view.action != wanted {
        return Json(view);
    }
    Json(state.connect.click().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::test_state;
    use crate::session::testing::RecordingSession;
    use std::sync::Arc;

    #[tokio::test]
    async fn connect_then_disconnect() {
        let session = Arc::new(RecordingSession::new());
        let state = test_state(session.clone());

        let Json(view) = connect(State(state.clone())).await;
        assert_eq!(view.status, "connected");

        // Connecting again does not start another ceremony
        let Json(again) = connect(State(state.clone())).await;
        assert_eq!(again, view);
        assert_eq!(*session.connect_calls.lock().unwrap(), 1);

        let Json(view) = disconnect(State(state.clone())).await;
        assert_eq!(view.status, "disconnected");
        assert_eq!(view.label, "Connect Wallet");
    }

    #[tokio::test]
    async fn disconnect_when_disconnected_is_noop() {
        let session = Arc::new(RecordingSession::new());
        let state = test_state(session.clone());

        let Json(view) = disconnect(State(state)).await;
        assert_eq!(view.status, "disconnected");
        assert_eq!(*session.connect_calls.lock().unwrap(), 0);
    }
}
