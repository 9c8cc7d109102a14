// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scripted [`WalletSession`] used by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use solana_program::pubkey::Pubkey;
use tokio::sync::{watch, Notify};

use super::{
    ConnectionState, SessionError, SessionStore, SignAndSendRequest, WalletInfo, WalletSession,
};

/// Records every call and answers from queued results.
#[derive(Default)]
pub struct RecordingSession {
    store: SessionStore,
    pub sent: Mutex<Vec<SignAndSendRequest>>,
    pub connect_calls: Mutex<usize>,
    connect_results: Mutex<VecDeque<Result<WalletInfo, SessionError>>>,
    send_results: Mutex<VecDeque<Result<String, SessionError>>>,
    /// When set, `sign_and_send` waits for a notification before answering.
    gate: Option<Arc<Notify>>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already has a connected smart wallet.
    pub fn connected(smart_wallet: Pubkey) -> Self {
        let session = Self::new();
        session.store.set_connected(WalletInfo::new(smart_wallet));
        session
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn push_connect(&self, result: Result<WalletInfo, SessionError>) {
        self.connect_results.lock().unwrap().push_back(result);
    }

    pub fn push_send(&self, result: Result<String, SessionError>) {
        self.send_results.lock().unwrap().push_back(result);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

#[async_trait]
impl WalletSession for RecordingSession {
    fn state(&self) -> ConnectionState {
        self.store.snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.store.subscribe()
    }

    async fn connect(&self) -> Result<WalletInfo, SessionError> {
        *self.connect_calls.lock().unwrap() += 1;
        let attempt = self.store.attempt_connect();
        let result = self
            .connect_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(WalletInfo::new(Pubkey::new_unique())));
        if let (Some(attempt), Ok(wallet)) = (attempt, &result) {
            attempt.succeed(wallet.clone());
        }
        result
    }

    async fn disconnect(&self) -> Result<(), SessionError> {
        self.store.set_disconnected();
        Ok(())
    }

    async fn sign_and_send(&self, request: SignAndSendRequest) -> Result<String, SessionError> {
        self.sent.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.send_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("SIG1".to_string()))
    }
}
