//! Error types for identifier and quantity construction

use thiserror::Error;

/// Errors raised while building ids or amounts from external input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("Ticker too long: {ticker} (max {max} bytes)")]
    TickerTooLong { ticker: String, max: usize },

    #[error("Invalid amount: {input}")]
    InvalidAmount { input: String },

    #[error("Negative amount: {input}")]
    NegativeAmount { input: String },

    #[error("Amount {input} has more than {decimals} decimal places")]
    TooPrecise { input: String, decimals: u32 },

    #[error("Unsupported decimals: {decimals}")]
    UnsupportedDecimals { decimals: u32 },

    #[error("Amount overflow: {input}")]
    Overflow { input: String },
}
