// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Passkey Gasless Demo - Smart Wallet Transfer Service
//!
//! Connects a passkey-backed smart wallet through an external authentication
//! portal and sends one SOL transfer on Solana Devnet whose network fee is
//! sponsored by a paymaster and charged in USDC.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and demo page (Axum)
//! - `blockchain` - Solana addresses, instructions and amounts
//! - `controls` - Connect button and transfer form state
//! - `session` - Wallet session capability and its portal-backed implementation
//! - `transfer` - Gasless transfer action

pub mod api;
pub mod blockchain;
pub mod config;
pub mod controls;
pub mod error;
pub mod logging;
pub mod session;
pub mod state;
pub mod transfer;
