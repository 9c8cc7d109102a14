// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer control endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{controls::TransferView, error::ApiError, state::AppState};

/// Request to update the recipient input.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetRecipientRequest {
    /// Recipient public key as typed by the user.
    pub recipient: String,
}

/// Request to press the send button.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SubmitTransferRequest {
    /// Replaces the recipient input before sending.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Amount in lamports; the configured default is used when omitted.
    #[serde(default)]
    pub lamports: Option<u64>,
}

/// Update the recipient input.
#[utoipa::path(
    put,
    path = "/v1/transfer/recipient",
    request_body = SetRecipientRequest,
    tag = "Transfer",
    responses((status = 200, description = "Updated transfer control", body = TransferView))
)]
pub async fn set_recipient(
    State(state): State<AppState>,
    Json(request): Json<SetRecipientRequest>,
) -> Json<TransferView> {
    state.transfer.set_recipient(request.recipient);
    Json(state.transfer.view())
}

/// Send the gasless transfer.
///
/// Validation and provider failures are reported in the returned view, the
/// same way the page shows them inline.
#[utoipa::path(
    post,
    path = "/v1/transfer",
    request_body = SubmitTransferRequest,
    tag = "Transfer",
    responses(
        (status = 200, description = "Transfer control after the attempt", body = TransferView),
        (status = 400, description = "Invalid amount"),
        (status = 409, description = "A transfer is already in flight")
    )
)]
pub async fn submit_transfer(
    State(state): State<AppState>,
    Json(request): Json<SubmitTransferRequest>,
) -> Result<Json<TransferView>, ApiError> {
    if request.lamports == Some(0) {
        return Err(ApiError::bad_request("lamports must be greater than zero"));
    }

    if state.transfer.status().is_sending() {
        return Err(ApiError::conflict("A transfer is already in flight"));
    }

    if let Some(recipient) = request.recipient {
        state.transfer.set_recipient(recipient);
    }

    state
        .transfer
        .submit(request.lamports)
        .await
        .ok_or_else(|| ApiError::conflict("A transfer is already in flight"))?;

    Ok(Json(state.transfer.view()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::test_state;
    use crate::session::testing::RecordingSession;
    use crate::session::SessionError;
    use axum::http::StatusCode;
    use solana_program::pubkey::Pubkey;
    use std::sync::Arc;

    #[tokio::test]
    async fn submit_reports_signature() {
        let session = Arc::new(RecordingSession::connected(Pubkey::new_unique()));
        let state = test_state(session.clone());

        let request = SubmitTransferRequest {
            recipient: Some(Pubkey::new_unique().to_string()),
            lamports: None,
        };
        let Json(view) = submit_transfer(State(state), Json(request)).await.unwrap();

        assert_eq!(view.status, "success");
        assert_eq!(view.message.as_deref(), Some("Tx confirmed: SIG1"));
        assert_eq!(view.signature.as_deref(), Some("SIG1"));
        assert_eq!(session.sent_count(), 1);
    }

    #[tokio::test]
    async fn provider_failure_is_reported_inline() {
        let session = Arc::new(RecordingSession::connected(Pubkey::new_unique()));
        session.push_send(Err(SessionError::Rejected("User rejected".into())));
        let state = test_state(session);

        let request = SubmitTransferRequest {
            recipient: Some(Pubkey::new_unique().to_string()),
            lamports: Some(1_000),
        };
        let Json(view) = submit_transfer(State(state), Json(request)).await.unwrap();

        assert_eq!(view.status, "error");
        assert_eq!(view.message.as_deref(), Some("User rejected"));
        assert!(!view.disabled);
    }

    #[tokio::test]
    async fn zero_lamports_is_rejected() {
        let session = Arc::new(RecordingSession::connected(Pubkey::new_unique()));
        let state = test_state(session.clone());

        let request = SubmitTransferRequest {
            recipient: Some(Pubkey::new_unique().to_string()),
            lamports: Some(0),
        };
        let err = submit_transfer(State(state), Json(request)).await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(session.sent_count(), 0);
    }

    #[tokio::test]
    async fn set_recipient_updates_view() {
        let state = test_state(Arc::new(RecordingSession::new()));

        let Json(view) = set_recipient(
            State(state),
            Json(SetRecipientRequest {
                recipient: "abc".into(),
            }),
        )
        .await;
        assert_eq!(view.recipient, "abc");
        assert_eq!(view.status, "idle");
    }
}
