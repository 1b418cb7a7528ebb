//! Balance Ledger — per-trader, per-token custody accounting
//!
//! Moves value between external token contracts and the ledger's custody
//! account while tracking how much each trader may withdraw:
//! - Deposit: resolve token, pull funds in, then credit the trader
//! - Withdraw: resolve token, check and debit the trader, then push funds out
//! - Balance queries (unregistered tokens read as zero)
//!
//! Invariant: for every token, the sum of trader balances never exceeds what
//! the custody account holds on that token's contract. Every credit follows a
//! successful inbound transfer; every debit precedes an outbound transfer and
//! is restored if that transfer fails.

use std::collections::HashMap;

use types::ids::{AccountId, ContractId, TokenId};
use types::numeric::Amount;
use tracing::{debug, info, warn};

use crate::errors::LedgerError;
use crate::events::{Deposited, LedgerEvent, TokenRegistered, Withdrawn};
use crate::registry::TokenRegistry;
use crate::token::TokenTransfer;

/// Multi-token custody ledger.
///
/// The ledger owns the token registry and all trader balance records. It
/// holds no locks: calls are serialized by the host, and the only way back in
/// during a call is through the `ledger` handle given to [`TokenTransfer`].
#[derive(Debug)]
pub struct Ledger {
    /// Account that holds custodied tokens on the token contracts
    custody: AccountId,
    registry: TokenRegistry,
    /// Balances: trader -> (token -> amount)
    balances: HashMap<AccountId, HashMap<TokenId, Amount>>,
    /// Emitted events log (append-only)
    events: Vec<LedgerEvent>,
    next_sequence: u64,
}

impl Ledger {
    /// Create an empty ledger. `admin` may register tokens; `custody` is the
    /// account the ledger holds deposited tokens under.
    pub fn new(admin: AccountId, custody: AccountId) -> Self {
        info!(%admin, %custody, "Ledger initialized");
        Self {
            custody,
            registry: TokenRegistry::new(admin),
            balances: HashMap::new(),
            events: Vec::new(),
            next_sequence: 0,
        }
    }

    // ───────────────────────── Registry ─────────────────────────

    /// Register a token. Admin-only; an id can only be registered once.
    pub fn register_token(
        &mut self,
        caller: &AccountId,
        token: TokenId,
        contract: ContractId,
    ) -> Result<(), LedgerError> {
        self.registry.register(caller, token, contract)?;

        let sequence = self.next_sequence();
        self.events.push(LedgerEvent::TokenRegistered(TokenRegistered {
            sequence,
            token,
            contract,
        }));
        Ok(())
    }

    /// Hand the admin role to another account.
    pub fn transfer_admin(
        &mut self,
        caller: &AccountId,
        new_admin: AccountId,
    ) -> Result<(), LedgerError> {
        self.registry.transfer_admin(caller, new_admin)?;
        Ok(())
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Account holding the ledger's tokens.
    pub fn custody(&self) -> AccountId {
        self.custody
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Move `amount` of `token` from `caller`'s external holdings into
    /// custody and credit it to `caller`.
    ///
    /// The caller must have approved the custody account for at least
    /// `amount` on the token contract. A zero amount succeeds without
    /// touching the token or emitting an event. Returns the caller's balance
    /// after the deposit.
    pub fn deposit<T: TokenTransfer + ?Sized>(
        &mut self,
        tokens: &mut T,
        caller: AccountId,
        token: TokenId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let contract = self.resolve(&token)?;
        if amount.is_zero() {
            return Ok(self.balance_of(&caller, &token));
        }

        // Reject before moving value that could not be credited.
        self.balance_of(&caller, &token)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // Funds must arrive before anything is credited.
        let custody = self.custody;
        tokens
            .transfer_from(self, contract, custody, caller, custody, amount)
            .map_err(|source| {
                warn!(trader = %caller, %token, %amount, error = %source, "Deposit transfer failed");
                LedgerError::TransferFailed { token, source }
            })?;

        let balance = self.credit(caller, token, amount)?;

        let sequence = self.next_sequence();
        self.events.push(LedgerEvent::Deposited(Deposited {
            sequence,
            trader: caller,
            token,
            amount,
        }));
        debug!(trader = %caller, %token, %amount, %balance, "Deposit credited");
        Ok(balance)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Debit `amount` of `token` from `caller` and send it from custody to
    /// `caller`'s external holdings.
    ///
    /// The balance is reduced before the outbound transfer so that a nested
    /// call made during the transfer sees the reduced balance. If the
    /// transfer fails the debit is restored and `TransferFailed` is returned.
    /// Returns the caller's balance after the withdrawal.
    pub fn withdraw<T: TokenTransfer + ?Sized>(
        &mut self,
        tokens: &mut T,
        caller: AccountId,
        token: TokenId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let contract = self.resolve(&token)?;

        let available = self.balance_of(&caller, &token);
        if available < amount {
            warn!(trader = %caller, %token, %amount, %available, "Withdrawal exceeds balance");
            return Err(LedgerError::InsufficientBalance {
                token,
                required: amount,
                available,
            });
        }
        if amount.is_zero() {
            return Ok(available);
        }

        self.debit(caller, token, amount)?;

        let custody = self.custody;
        if let Err(source) = tokens.transfer(self, contract, custody, caller, amount) {
            // Nested calls may have moved the record; restoring must not
            // mask the transfer failure.
            match self.credit(caller, token, amount) {
                Ok(_) => warn!(
                    trader = %caller,
                    %token,
                    %amount,
                    error = %source,
                    "Withdrawal transfer failed, debit restored"
                ),
                Err(restore) => warn!(
                    trader = %caller,
                    %token,
                    %amount,
                    error = %source,
                    restore_error = %restore,
                    "Withdrawal transfer failed, debit could not be restored"
                ),
            }
            return Err(LedgerError::TransferFailed { token, source });
        }

        let balance = self.balance_of(&caller, &token);
        let sequence = self.next_sequence();
        self.events.push(LedgerEvent::Withdrawn(Withdrawn {
            sequence,
            trader: caller,
            token,
            amount,
        }));
        debug!(trader = %caller, %token, %amount, %balance, "Withdrawal sent");
        Ok(balance)
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Balance of `trader` in `token`; zero if never touched or unregistered.
    pub fn balance_of(&self, trader: &AccountId, token: &TokenId) -> Amount {
        self.balances
            .get(trader)
            .and_then(|tokens| tokens.get(token))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// All balance records of a trader, including ones driven back to zero.
    pub fn trader_balances(&self, trader: &AccountId) -> Option<&HashMap<TokenId, Amount>> {
        self.balances.get(trader)
    }

    /// Sum of every trader's balance in `token`.
    ///
    /// Never exceeds the custody account's holdings on the token contract.
    pub fn total_deposits(&self, token: &TokenId) -> Amount {
        self.balances
            .values()
            .filter_map(|tokens| tokens.get(token))
            .fold(Amount::ZERO, |acc, amount| acc.saturating_add(*amount))
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal ─────────────────────────

    fn resolve(&self, token: &TokenId) -> Result<ContractId, LedgerError> {
        self.registry.resolve(token).map_err(|err| {
            warn!(%token, "Operation on unregistered token");
            LedgerError::from(err)
        })
    }

    fn credit(
        &mut self,
        trader: AccountId,
        token: TokenId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let current = self
            .balances
            .entry(trader)
            .or_default()
            .entry(token)
            .or_insert(Amount::ZERO);

        *current = current.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(*current)
    }

    fn debit(
        &mut self,
        trader: AccountId,
        token: TokenId,
        amount: Amount,
    ) -> Result<Amount, LedgerError> {
        let current = self
            .balances
            .entry(trader)
            .or_default()
            .entry(token)
            .or_insert(Amount::ZERO);

        let available = *current;
        *current = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                token,
                required: amount,
                available,
            })?;
        Ok(*current)
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}
