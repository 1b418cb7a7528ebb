//! Contract-specific error types
//!
//! Error taxonomy for registry, token transfer and ledger operations.

use types::ids::TokenId;
use types::numeric::Amount;
use thiserror::Error;

/// Registry-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unauthorized: caller is not admin")]
    Unauthorized,

    #[error("Token already registered: {token}")]
    AlreadyRegistered { token: TokenId },

    #[error("invalid token: {token}")]
    InvalidToken { token: TokenId },
}

/// Failures reported by an external token contract
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Unknown token contract")]
    UnknownContract,

    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance { required: Amount, available: Amount },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("Transfer rejected: {reason}")]
    Rejected { reason: String },
}

/// Ledger errors surfaced to callers
///
/// Every variant aborts the whole operation; no balance or custody change is
/// visible after an error is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("invalid token: {token}")]
    InvalidToken { token: TokenId },

    #[error("not enough balance for {token}: required {required}, available {available}")]
    InsufficientBalance {
        token: TokenId,
        required: Amount,
        available: Amount,
    },

    #[error("Transfer of {token} failed: {source}")]
    TransferFailed {
        token: TokenId,
        #[source]
        source: TransferError,
    },

    #[error("Unauthorized: caller is not admin")]
    Unauthorized,

    #[error("Token already registered: {token}")]
    TokenAlreadyRegistered { token: TokenId },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

impl From<RegistryError> for LedgerError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Unauthorized => LedgerError::Unauthorized,
            RegistryError::AlreadyRegistered { token } => {
                LedgerError::TokenAlreadyRegistered { token }
            }
            RegistryError::InvalidToken { token } => LedgerError::InvalidToken { token },
        }
    }
}
