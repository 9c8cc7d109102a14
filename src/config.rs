// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and is not
//! re-validated afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RPC_URL` | Solana RPC endpoint | Required |
//! | `PORTAL_URL` | Passkey authentication portal | Required |
//! | `PAYMASTER_URL` | Fee sponsorship service | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TRANSFER_AMOUNT_SOL` | Default transfer amount in SOL | `0.1` |
//! | `FEE_TOKEN` | Token the paymaster charges fees in | `USDC` |
//! | `CONNECT_TIMEOUT_SECS` | Passkey ceremony window | `120` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::blockchain::{parse_sol, AmountError, FeeToken, DEFAULT_TRANSFER_LAMPORTS};

pub const RPC_URL_ENV: &str = "RPC_URL";
pub const PORTAL_URL_ENV: &str = "PORTAL_URL";
pub const PAYMASTER_URL_ENV: &str = "PAYMASTER_URL";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TRANSFER_AMOUNT_ENV: &str = "TRANSFER_AMOUNT_SOL";
pub const FEE_TOKEN_ENV: &str = "FEE_TOKEN";
pub const CONNECT_TIMEOUT_ENV: &str = "CONNECT_TIMEOUT_SECS";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default `RUST_LOG` filter when none is set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(120);

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rpc_url: Url,
    pub portal_url: Url,
    pub paymaster_url: Url,
    pub bind_addr: SocketAddr,
    /// Amount sent when a transfer does not specify one.
    pub transfer_lamports: u64,
    pub fee_token: FeeToken,
    pub connect_timeout: Duration,
}

/// Errors raised while loading [`AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("TRANSFER_AMOUNT_SOL is invalid: {0}")]
    Amount(#[from] AmountError),
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let rpc_url = required_url(RPC_URL_ENV, get(RPC_URL_ENV))?;
        let portal_url = required_url(PORTAL_URL_ENV, get(PORTAL_URL_ENV))?;
        let paymaster_url = required_url(PAYMASTER_URL_ENV, get(PAYMASTER_URL_ENV))?;

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let transfer_lamports = match get(TRANSFER_AMOUNT_ENV) {
            Some(raw) => parse_sol(&raw)?,
            None => DEFAULT_TRANSFER_LAMPORTS,
        };

        let fee_token = get(FEE_TOKEN_ENV)
            .map(|symbol| FeeToken(symbol.trim().to_string()))
            .unwrap_or_default();

        let connect_timeout = match get(CONNECT_TIMEOUT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| ConfigError::Invalid {
                    name: CONNECT_TIMEOUT_ENV,
                    reason: format!("expected a positive number of seconds, got `{raw}`"),
                })?,
            None => DEFAULT_CONNECT_TIMEOUT,
        };

        Ok(Self {
            rpc_url,
            portal_url,
            paymaster_url,
            bind_addr,
            transfer_lamports,
            fee_token,
            connect_timeout,
        })
    }

    #[cfg(test)]
    pub(crate) fn for_tests(portal_url: &str, paymaster_url: &str) -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".parse().unwrap(),
            portal_url: portal_url.parse().unwrap(),
            paymaster_url: paymaster_url.parse().unwrap(),
            bind_addr: ([127, 0, 0, 1], 0).into(),
            transfer_lamports: DEFAULT_TRANSFER_LAMPORTS,
            fee_token: FeeToken::usdc(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

fn required_url(name: &'static str, value: Option<String>) -> Result<Url, ConfigError> {
    let raw = value.ok_or(ConfigError::Missing(name))?;
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            name,
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}
