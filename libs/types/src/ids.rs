//! Identifier types for ledger entities
//!
//! Accounts and token contracts use UUID v7 so that ids created during
//! setup sort in creation order. Token identifiers are fixed-width symbolic
//! keys (`bytes32` tickers).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::TypeError;

/// Unique identifier for an account
///
/// Traders, the administrator and the ledger's own custody account are all
/// accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of an external token contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(Uuid);

impl ContractId {
    /// Create a new ContractId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContractId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Width of a token identifier in bytes.
pub const TOKEN_ID_LEN: usize = 32;

/// Fixed-width symbolic token identifier
///
/// Encoded like a `bytes32` ticker: UTF-8 text, right-padded with zero bytes.
/// At most 31 bytes of text are accepted so the value stays zero-terminated.
/// The ledger never interprets the bytes; equality is byte equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId([u8; TOKEN_ID_LEN]);

impl TokenId {
    /// Encode a ticker such as `"DAI"`.
    pub fn from_ticker(ticker: &str) -> Result<Self, TypeError> {
        let bytes = ticker.as_bytes();
        if bytes.len() >= TOKEN_ID_LEN {
            return Err(TypeError::TickerTooLong {
                ticker: ticker.to_string(),
                max: TOKEN_ID_LEN - 1,
            });
        }
        let mut raw = [0u8; TOKEN_ID_LEN];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    /// Wrap raw bytes as-is.
    pub const fn from_bytes(raw: [u8; TOKEN_ID_LEN]) -> Self {
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; TOKEN_ID_LEN] {
        &self.0
    }

    /// Ticker text up to the first zero byte (lossy for non-UTF-8 ids).
    pub fn ticker(&self) -> String {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(TOKEN_ID_LEN);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

impl TryFrom<&str> for TokenId {
    type Error = TypeError;

    fn try_from(ticker: &str) -> Result<Self, Self::Error> {
        Self::from_ticker(ticker)
    }
}
