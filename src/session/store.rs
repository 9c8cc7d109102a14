// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Observable connection state shared by session implementations.

use tokio::sync::watch;

use super::{ConnectionState, WalletInfo};

/// Holds the current [`ConnectionState`] and notifies subscribers on change.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<ConnectionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectionState::Disconnected);
        Self { tx }
    }

    pub fn snapshot(&self) -> ConnectionState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.tx.subscribe()
    }

    /// Move to `Connecting` unless a ceremony is already running or a wallet
    /// is connected. Returns whether the transition happened.
    pub fn begin_connect(&self) -> bool {
        self.tx.send_if_modified(|state| match state {
            ConnectionState::Disconnected => {
                *state = ConnectionState::Connecting;
                true
            }
            _ => false,
        })
    }

    /// Start a connection attempt. The returned guard puts the store back to
    /// `Disconnected` when it is dropped without [`ConnectAttempt::succeed`],
    /// including when the connecting future itself is dropped.
    pub fn attempt_connect(&self) -> Option<ConnectAttempt<'_>> {
        self.begin_connect().then(|| ConnectAttempt {
            store: self,
            settled: false,
        })
    }

    /// Leave `Connecting` for `Disconnected`. Other states are kept.
    fn abandon_connect(&self) {
        self.tx.send_if_modified(|state| {
            if state.is_connecting() {
                *state = ConnectionState::Disconnected;
                true
            } else {
                false
            }
        });
    }

    pub fn set_connected(&self, wallet: WalletInfo) {
        self.tx.send_replace(ConnectionState::Connected(wallet));
    }

    pub fn set_disconnected(&self) {
        self.tx.send_if_modified(|state| {
            if *state == ConnectionState::Disconnected {
                false
            } else {
                *state = ConnectionState::Disconnected;
                true
            }
        });
    }
}

/// In-flight connection attempt started by [`SessionStore::attempt_connect`].
#[derive(Debug)]
pub struct ConnectAttempt<'a> {
    store: &'a SessionStore,
    settled: bool,
}

impl ConnectAttempt<'_> {
    pub fn succeed(mut self, wallet: WalletInfo) {
        self.settled = true;
        self.store.set_connected(wallet);
    }
}

impl Drop for ConnectAttempt<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.store.abandon_connect();
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::pubkey::Pubkey;

    #[test]
    fn begin_connect_only_from_disconnected() {
        let store = SessionStore::new();
        assert!(store.begin_connect());
        assert_eq!(store.snapshot(), ConnectionState::Connecting);
        assert!(!store.begin_connect());

        store.set_connected(WalletInfo::new(Pubkey::new_unique()));
        assert!(!store.begin_connect());
        assert!(store.snapshot().is_connected());
    }

    #[test]
    fn dropped_attempt_returns_to_disconnected() {
        let store = SessionStore::new();

        let attempt = store.attempt_connect().unwrap();
        assert_eq!(store.snapshot(), ConnectionState::Connecting);
        assert!(store.attempt_connect().is_none());
        assert_eq!(store.snapshot(), ConnectionState::Connecting);
        drop(attempt);
        assert_eq!(store.snapshot(), ConnectionState::Disconnected);

        let wallet = WalletInfo::new(Pubkey::new_unique());
        store.attempt_connect().unwrap().succeed(wallet.clone());
        assert_eq!(store.snapshot(), ConnectionState::Connected(wallet));
    }

    #[test]
    fn dropped_attempt_keeps_a_later_disconnect() {
        let store = SessionStore::new();
        let attempt = store.attempt_connect().unwrap();

        store.set_disconnected();
        drop(attempt);
        assert_eq!(store.snapshot(), ConnectionState::Disconnected);
        assert!(store.attempt_connect().is_some());
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.begin_connect();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ConnectionState::Connecting);

        let wallet = WalletInfo::new(Pubkey::new_unique());
        store.set_connected(wallet.clone());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ConnectionState::Connected(wallet));

        store.set_disconnected();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ConnectionState::Disconnected);

        // No-op transitions do not wake subscribers
        store.set_disconnected();
        assert!(!rx.has_changed().unwrap());
    }
}
