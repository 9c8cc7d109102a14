// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use serde::{Deserialize, Serialize};
use solana_program::native_token::LAMPORTS_PER_SOL;
use utoipa::ToSchema;

/// Solana cluster configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Cluster query parameter understood by the explorer
    pub cluster: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Solana Devnet configuration.
pub const SOLANA_DEVNET: NetworkConfig = NetworkConfig {
    name: "Solana Devnet",
    cluster: "devnet",
    explorer_url: "https://explorer.solana.com",
};

impl NetworkConfig {
    /// Explorer link for a transaction signature on this cluster.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!(
            "{}/tx/{}?cluster={}",
            self.explorer_url, signature, self.cluster
        )
    }
}

/// SOL uses 9 decimals (1 SOL = 1e9 lamports).
pub const SOL_DECIMALS: u8 = 9;

/// Amount sent when the caller does not pick one: 0.1 SOL.
pub const DEFAULT_TRANSFER_LAMPORTS: u64 = LAMPORTS_PER_SOL / 10;

/// Token the paymaster charges network fees in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FeeToken(pub String);

impl FeeToken {
    pub fn usdc() -> Self {
        FeeToken(USDC_SYMBOL.to_string())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl Default for FeeToken {
    fn default() -> Self {
        Self::usdc()
    }
}

impl std::fmt::Display for FeeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Symbol the paymaster expects for USD Coin.
pub const USDC_SYMBOL: &str = "USDC";

/// Errors parsing a human-readable SOL amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount format")]
    InvalidFormat,

    #[error("Too many decimal places (max {0})")]
    TooManyDecimals(u8),

    #[error("Amount overflow")]
    Overflow,

    #[error("Amount must be greater than zero")]
    Zero,
}

/// Parse a human-readable SOL amount (e.g. "0.1") into lamports.
pub fn parse_sol(amount: &str) -> Result<u64, AmountError> {
    let amount = amount.trim();
    // `u64::from_str` accepts a leading `+`, so reject anything but digits and dots
    if !amount.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(AmountError::InvalidFormat);
    }

    let parts: Vec<&str> = amount.split('.').collect();

    if parts.len() > 2 || parts[0].is_empty() && parts.get(1).map_or(true, |d| d.is_empty()) {
        return Err(AmountError::InvalidFormat);
    }

    let whole = if parts[0].is_empty() {
        0
    } else {
        parts[0]
            .parse::<u64>()
            .map_err(|_| AmountError::InvalidFormat)?
    };

    let decimal_part = match parts.get(1) {
        Some(dec_str) if !dec_str.is_empty() => {
            if dec_str.len() > SOL_DECIMALS as usize {
                return Err(AmountError::TooManyDecimals(SOL_DECIMALS));
            }
            // Pad with zeros to match decimals
            let padded = format!("{:0<width$}", dec_str, width = SOL_DECIMALS as usize);
            padded
                .parse::<u64>()
                .map_err(|_| AmountError::InvalidFormat)?
        }
        _ => 0,
    };

    let lamports = whole
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|w| w.checked_add(decimal_part))
        .ok_or(AmountError::Overflow)?;

    if lamports == 0 {
        return Err(AmountError::Zero);
    }

    Ok(lamports)
}

/// Format lamports as a human-readable SOL amount.
pub fn format_sol(lamports: u64) -> String {
    let whole = lamports / LAMPORTS_PER_SOL;
    let remainder = lamports % LAMPORTS_PER_SOL;

    if remainder == 0 {
        return whole.to_string();
    }

    let decimal_str = format!("{:0>width$}", remainder, width = SOL_DECIMALS as usize);
    format!("{}.{}", whole, decimal_str.trim_end_matches('0'))
}
