// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Recipient input and send button for the gasless transfer.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::blockchain::{format_sol, NetworkConfig};
use crate::transfer::GaslessTransfer;

/// Outcome of the latest submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success { signature: String },
    Error { message: String },
}

impl SubmissionStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, SubmissionStatus::Sending)
    }

    /// Inline message shown under the button.
    pub fn message(&self) -> Option<String> {
        match self {
            SubmissionStatus::Success { signature } => Some(format!("Tx confirmed: {signature}")),
            SubmissionStatus::Error { message } => Some(message.clone()),
            SubmissionStatus::Idle | SubmissionStatus::Sending => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success { .. } => "success",
            SubmissionStatus::Error { .. } => "error",
        }
    }
}

/// Form state owned by the control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TransferForm {
    recipient: String,
    status: SubmissionStatus,
}

/// Rendered state of the transfer control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TransferView {
    pub recipient: String,
    pub placeholder: String,
    pub button_label: String,
    pub disabled: bool,
    /// "idle", "sending", "success" or "error".
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

/// Message shown when a submission ends without reporting an outcome.
const INTERRUPTED_MESSAGE: &str = "Transfer interrupted before completion.";

/// Writes the outcome of a submission, or an interruption error if dropped
/// first, so the form never stays in `Sending`.
struct SubmissionGuard {
    form: Arc<watch::Sender<TransferForm>>,
    settled: bool,
}

impl SubmissionGuard {
    fn settle(mut self, outcome: SubmissionStatus) {
        self.settled = true;
        self.form.send_modify(|form| form.status = outcome);
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Transfer ended without an outcome");
            self.form.send_modify(|form| {
                form.status = SubmissionStatus::Error {
                    message: INTERRUPTED_MESSAGE.to_string(),
                }
            });
        }
    }
}

/// Transfer control. At most one submission is in flight at a time.
pub struct TransferControl {
    transfer: GaslessTransfer,
    network: NetworkConfig,
    form: Arc<watch::Sender<TransferForm>>,
}

impl TransferControl {
    pub fn new(transfer: GaslessTransfer, network: NetworkConfig) -> Self {
        let (form, _rx) = watch::channel(TransferForm::default());
        Self {
            transfer,
            network,
            form: Arc::new(form),
        }
    }

    pub fn set_recipient(&self, recipient: impl Into<String>) {
        let recipient = recipient.into();
        self.form.send_modify(|form| form.recipient = recipient);
    }

    pub fn status(&self) -> SubmissionStatus {
        self.form.borrow().status.clone()
    }

    pub fn view(&self) -> TransferView {
        let form = self.form.borrow().clone();
        let signature = match &form.status {
            SubmissionStatus::Success { signature } => Some(signature.clone()),
            _ => None,
        };

        TransferView {
            recipient: form.recipient,
            placeholder: "Enter recipient public key (Devnet)".to_string(),
            button_label: self.button_label(&form.status),
            disabled: form.status.is_sending(),
            status: form.status.as_str().to_string(),
            message: form.status.message(),
            explorer_url: signature
                .as_deref()
                .map(|sig| self.network.explorer_tx_url(sig)),
            signature,
        }
    }

    fn button_label(&self, status: &SubmissionStatus) -> String {
        if status.is_sending() {
            "Sending...".to_string()
        } else {
            format!(
                "Send {} SOL (gasless {})",
                format_sol(self.transfer.default_lamports()),
                self.transfer.fee_token()
            )
        }
    }

    /// Handle a button press.
    ///
    /// Returns `None` when a submission is already in flight; the press is
    /// ignored just like a click on a disabled button.
    ///
    /// The attempt runs on its own task. Dropping this future stops waiting
    /// for the outcome but not the attempt, which still settles the status.
    pub async fn submit(&self, lamports: Option<u64>) -> Option<SubmissionStatus> {
        let mut recipient = String::new();
        let started = self.form.send_if_modified(|form| {
            if form.status.is_sending() {
                return false;
            }
            form.status = SubmissionStatus::Sending;
            recipient = form.recipient.clone();
            true
        });

        if !started {
            debug!("Transfer already in flight, ignoring submit");
            return None;
        }

        let guard = SubmissionGuard {
            form: self.form.clone(),
            settled: false,
        };
        let transfer = self.transfer.clone();
        let attempt = tokio::spawn(async move {
            let outcome = match transfer.transfer(&recipient, lamports).await {
                Ok(signature) => {
                    info!(signature = %signature, "Transaction confirmed");
                    SubmissionStatus::Success { signature }
                }
                Err(e) => {
                    warn!(error = %e, "Transfer failed");
                    SubmissionStatus::Error {
                        message: e.to_string(),
                    }
                }
            };
            guard.settle(outcome.clone());
            outcome
        });

        match attempt.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(error = %e, "Transfer task failed");
                Some(self.status())
            }
        }
    }
}
