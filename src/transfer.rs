// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gasless SOL transfer through the connected smart wallet.
//!
//! The transfer is a plain System Program instruction; the smart wallet
//! executes it and the paymaster pays the SOL fee in exchange for the fee
//! token. Each call is a single attempt with no retry.

use std::sync::Arc;

use tracing::info;

use crate::blockchain::{native_transfer, parse_address, FeeToken, InvalidAddress};
use crate::session::{SessionError, SignAndSendRequest, TransactionOptions, WalletSession};

/// Errors returned by [`GaslessTransfer::transfer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("Wallet not connected.")]
    NotConnected,

    #[error("Recipient not provided.")]
    MissingRecipient,

    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Builds and submits fee-sponsored transfers for one wallet session.
#[derive(Clone)]
pub struct GaslessTransfer {
    session: Arc<dyn WalletSession>,
    fee_token: FeeToken,
    default_lamports: u64,
}

impl GaslessTransfer {
    pub fn new(session: Arc<dyn WalletSession>, fee_token: FeeToken, default_lamports: u64) -> Self {
        Self {
            session,
            fee_token,
            default_lamports,
        }
    }

    pub fn fee_token(&self) -> &FeeToken {
        &self.fee_token
    }

    pub fn default_lamports(&self) -> u64 {
        self.default_lamports
    }

    /// Send `lamports` (or the default amount) to `recipient`.
    ///
    /// Returns the transaction signature reported by the wallet provider.
    pub async fn transfer(
        &self,
        recipient: &str,
        lamports: Option<u64>,
    ) -> Result<String, TransferError> {
        let wallet = self
            .session
            .state()
            .wallet()
            .cloned()
            .ok_or(TransferError::NotConnected)?;

        if recipient.trim().is_empty() {
            return Err(TransferError::MissingRecipient);
        }

        let destination = parse_address(recipient)?;
        let lamports = lamports.unwrap_or(self.default_lamports);
        let instruction = native_transfer(&wallet.smart_wallet, &destination, lamports);

        let signature = self
            .session
            .sign_and_send(SignAndSendRequest {
                instructions: vec![instruction],
                transaction_options: TransactionOptions {
                    fee_token: Some(self.fee_token.clone()),
                },
            })
            .await?;

        info!(
            from = %wallet.smart_wallet,
            to = %destination,
            lamports,
            fee_token = %self.fee_token,
            signature = %signature,
            "Gasless transfer submitted"
        );

        Ok(signature)
    }
}
