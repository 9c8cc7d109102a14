// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Instruction building for Solana native transfers.
//!
//! The smart wallet executes plain System Program instructions; this module
//! builds them and converts them to the JSON shape the paymaster accepts.

use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use solana_program::{instruction::Instruction, pubkey::Pubkey, system_instruction};

/// Parse a base58 Solana address.
///
/// Surrounding whitespace is ignored to tolerate copy/paste.
pub fn parse_address(address: &str) -> Result<Pubkey, InvalidAddress> {
    let trimmed = address.trim();
    Pubkey::from_str(trimmed).map_err(|e| InvalidAddress {
        address: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Error returned for strings that are not valid Solana addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid address `{address}`: {reason}")]
pub struct InvalidAddress {
    pub address: String,
    pub reason: String,
}

/// Build a native SOL transfer from `from` to `to`.
pub fn native_transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(from, to, lamports)
}

/// Account reference inside a [`WireInstruction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAccountMeta {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// JSON form of an instruction: base58 keys and base64 data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireInstruction {
    pub program_id: String,
    pub accounts: Vec<WireAccountMeta>,
    pub data: String,
}

impl From<&Instruction> for WireInstruction {
    fn from(ix: &Instruction) -> Self {
        Self {
            program_id: ix.program_id.to_string(),
            accounts: ix
                .accounts
                .iter()
                .map(|meta| WireAccountMeta {
                    pubkey: meta.pubkey.to_string(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            data: STANDARD.encode(&ix.data),
        }
    }
}
