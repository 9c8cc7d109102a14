// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    controls::{ConnectAction, ConnectButtonView, TransferView},
    state::AppState,
};

pub mod health;
pub mod page;
pub mod session;
pub mod transfer;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/state", get(page::page_state))
        .route("/session/connect", post(session::connect))
        .route("/session/disconnect", post(session::disconnect))
        .route("/transfer", post(transfer::submit_transfer))
        .route("/transfer/recipient", put(transfer::set_recipient))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .route("/", get(page::index))
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        page::page_state,
        session::connect,
        session::disconnect,
        transfer::set_recipient,
        transfer::submit_transfer,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            page::PageState,
            ConnectAction,
            ConnectButtonView,
            TransferView,
            transfer::SetRecipientRequest,
            transfer::SubmitTransferRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Page", description = "State of the demo page controls"),
        (name = "Session", description = "Passkey smart wallet connection"),
        (name = "Transfer", description = "Gasless SOL transfer"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::testing::RecordingSession;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use solana_program::pubkey::Pubkey;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub(crate) fn test_state(session: Arc<RecordingSession>) -> AppState {
        test_state_with_rpc(session, "http://127.0.0.1:8899")
    }

    pub(crate) fn test_state_with_rpc(session: Arc<RecordingSession>, rpc_url: &str) -> AppState {
        let mut config = AppConfig::for_tests("http://127.0.0.1:1", "http://127.0.0.1:2");
        config.rpc_url = rpc_url.parse().unwrap();
        AppState::new(config, session).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn index_serves_html_with_request_id() {
        let app = router(test_state(Arc::new(RecordingSession::new())));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn full_flow_over_http() {
        let session = Arc::new(RecordingSession::new());
        let app = router(test_state(session.clone()));
        let recipient = Pubkey::new_unique().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/session/connect")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "connected");

        let response = app
            .clone()
            .oneshot(
                Request::post("/v1/transfer")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({ "recipient": recipient }).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Tx confirmed: SIG1");
        assert_eq!(body["disabled"], false);

        let response = app
            .oneshot(Request::get("/v1/state").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["transfer"]["recipient"], recipient);
        assert_eq!(body["transfer"]["status"], "success");
        assert_eq!(body["connection"]["action"], "disconnect");
        assert_eq!(session.sent_count(), 1);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = router(test_state(Arc::new(RecordingSession::new())));
        let response = app
            .oneshot(
                Request::get("/api-doc/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"]["/v1/transfer"]["post"].is_object());
    }
}
