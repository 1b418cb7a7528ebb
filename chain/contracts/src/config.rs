//! Ledger setup configuration
//!
//! Describes the admin, the custody account and the tokens to register when
//! the ledger is created. Loaded from JSON.

use std::path::Path;

use types::errors::TypeError;
use types::ids::{AccountId, ContractId, TokenId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::errors::LedgerError;
use crate::ledger::Ledger;

/// Errors raised while loading a configuration or applying it.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid ticker in config: {0}")]
    Ticker(#[from] TypeError),

    #[error("Ledger setup failed: {0}")]
    Ledger(#[from] LedgerError),
}

/// A token to register at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenListing {
    /// Ticker text, encoded into a `TokenId`
    pub ticker: String,
    pub contract: ContractId,
}

/// Configuration for a new ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Account allowed to register tokens
    pub admin: AccountId,
    /// Account that holds custodied tokens
    pub custody: AccountId,
    /// Tokens registered in listed order
    #[serde(default)]
    pub tokens: Vec<TokenListing>,
}

impl LedgerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Listings with tickers encoded.
    pub fn listings(&self) -> Result<Vec<(TokenId, ContractId)>, ConfigError> {
        self.tokens
            .iter()
            .map(|listing| Ok((TokenId::from_ticker(&listing.ticker)?, listing.contract)))
            .collect()
    }
}

impl Ledger {
    /// Build a ledger and register every configured token as the admin.
    pub fn from_config(config: &LedgerConfig) -> Result<Self, ConfigError> {
        let listings = config.listings()?;

        let mut ledger = Ledger::new(config.admin, config.custody);
        for (token, contract) in listings {
            ledger.register_token(&config.admin, token, contract)?;
        }

        info!(tokens = ledger.registry().len(), "Ledger configured");
        Ok(ledger)
    }
}
