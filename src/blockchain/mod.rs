// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for Solana Devnet.
//!
//! This module provides functionality for:
//! - Parsing base58 addresses
//! - Building native SOL transfer instructions
//! - Amount parsing/formatting in lamports
//! - RPC node health checks

pub mod client;
pub mod transactions;
pub mod types;

pub use client::{RpcClient, RpcClientError};
pub use transactions::{native_transfer, parse_address, InvalidAddress, WireInstruction};
pub use types::*;
