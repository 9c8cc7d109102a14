// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Demo page and the state snapshot it polls.

use axum::{extract::State, response::Html, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    controls::{ConnectButtonView, TransferView},
    state::AppState,
};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Everything the page needs to render both controls.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageState {
    pub connection: ConnectButtonView,
    pub transfer: TransferView,
}

/// Serve the demo page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Current view of both controls.
#[utoipa::path(
    get,
    path = "/v1/state",
    tag = "Page",
    responses((status = 200, description = "Current control state", body = PageState))
)]
pub async fn page_state(State(state): State<AppState>) -> Json<PageState> {
    Json(PageState {
        connection: state.connect.view(),
        transfer: state.transfer.view(),
    })
}
