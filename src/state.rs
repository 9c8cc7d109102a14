// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::{RpcClient, RpcClientError, SOLANA_DEVNET};
use crate::config::AppConfig;
use crate::controls::{ConnectControl, TransferControl};
use crate::session::WalletSession;
use crate::transfer::GaslessTransfer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<dyn WalletSession>,
    pub connect: ConnectControl,
    pub transfer: Arc<TransferControl>,
    pub rpc: RpcClient,
}

impl AppState {
    /// Wire the controls to the injected wallet session.
    pub fn new(config: AppConfig, session: Arc<dyn WalletSession>) -> Result<Self, RpcClientError> {
        let gasless = GaslessTransfer::new(
            session.clone(),
            config.fee_token.clone(),
            config.transfer_lamports,
        );
        let rpc = RpcClient::new(config.rpc_url.clone())?;

        Ok(Self {
            connect: ConnectControl::new(session.clone()),
            transfer: Arc::new(TransferControl::new(gasless, SOLANA_DEVNET)),
            session,
            rpc,
            config: Arc::new(config),
        })
    }
}
