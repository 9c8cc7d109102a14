// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process::ExitCode, sync::Arc};

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use passkey_gasless_demo::{
    api::router,
    blockchain::SOLANA_DEVNET,
    config::AppConfig,
    logging::init_tracing,
    session::portal::PortalSession,
    state::AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing();

    let session = match PortalSession::new(&config) {
        Ok(session) => Arc::new(session),
        Err(e) => {
            error!(error = %e, "Failed to create wallet session");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.bind_addr;
    info!(
        network = SOLANA_DEVNET.name,
        rpc_url = %config.rpc_url,
        portal_url = %config.portal_url,
        paymaster_url = %config.paymaster_url,
        fee_token = %config.fee_token,
        "Starting passkey gasless demo"
    );

    let state = match AppState::new(config, session) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            return ExitCode::FAILURE;
        }
    };
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    info!("Listening on http://{addr} (docs at /docs)");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
    {
        error!(error = %e, "Server failed");
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

/// Cancel `shutdown` on Ctrl+C or SIGTERM.
async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    shutdown.cancel();
}
