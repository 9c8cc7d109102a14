// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Page Controls
//!
//! UI-independent view models for the two controls on the demo page. Each
//! control owns its display state and renders a serializable view; the web
//! layer only forwards clicks and returns views.
//!
//! - `connect` - connect/disconnect button over the wallet session state
//! - `transfer` - recipient input and gasless send button

pub mod connect;
pub mod transfer;

pub use connect::{short_address, ConnectAction, ConnectButtonView, ConnectControl};
pub use transfer::{SubmissionStatus, TransferControl, TransferView};
