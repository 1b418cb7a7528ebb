//! Ledger events
//!
//! Events are immutable records emitted by successful ledger operations for
//! off-system auditors. Every event carries the ledger-wide sequence number
//! assigned at emission.

use types::ids::{AccountId, ContractId, TokenId};
use types::numeric::Amount;
use serde::{Deserialize, Serialize};

/// A token was added to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistered {
    pub sequence: u64,
    pub token: TokenId,
    pub contract: ContractId,
}

/// Value moved from a trader's external holdings into ledger custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub sequence: u64,
    pub trader: AccountId,
    pub token: TokenId,
    pub amount: Amount,
}

/// Value moved from ledger custody back to a trader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawn {
    pub sequence: u64,
    pub trader: AccountId,
    pub token: TokenId,
    pub amount: Amount,
}

/// Operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TokenRegistered,
    Deposit,
    Withdrawal,
}

/// Enum wrapper for all ledger events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    TokenRegistered(TokenRegistered),
    Deposited(Deposited),
    Withdrawn(Withdrawn),
}

impl LedgerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LedgerEvent::TokenRegistered(_) => EventKind::TokenRegistered,
            LedgerEvent::Deposited(_) => EventKind::Deposit,
            LedgerEvent::Withdrawn(_) => EventKind::Withdrawal,
        }
    }

    pub fn sequence(&self) -> u64 {
        match self {
            LedgerEvent::TokenRegistered(e) => e.sequence,
            LedgerEvent::Deposited(e) => e.sequence,
            LedgerEvent::Withdrawn(e) => e.sequence,
        }
    }

    pub fn token(&self) -> TokenId {
        match self {
            LedgerEvent::TokenRegistered(e) => e.token,
            LedgerEvent::Deposited(e) => e.token,
            LedgerEvent::Withdrawn(e) => e.token,
        }
    }

    /// Trader involved, if the event concerns a balance.
    pub fn trader(&self) -> Option<AccountId> {
        match self {
            LedgerEvent::TokenRegistered(_) => None,
            LedgerEvent::Deposited(e) => Some(e.trader),
            LedgerEvent::Withdrawn(e) => Some(e.trader),
        }
    }
}
