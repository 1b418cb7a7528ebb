//! External token capability
//!
//! The ledger never moves value itself; it asks the token contract named by
//! the registry to do so through [`TokenTransfer`]. [`TokenBook`] is an
//! in-memory set of ERC-20 style faucet tokens implementing the capability,
//! used when the ledger runs without a chain.

use std::collections::HashMap;

use types::ids::{AccountId, ContractId};
use types::numeric::Amount;

use crate::errors::TransferError;
use crate::ledger::Ledger;

/// Value-movement primitive of external token contracts.
///
/// `ledger` is the ledger making the call. It is passed through so that
/// code running inside the transfer (token hooks, caller-controlled
/// contracts) can call back into it before the transfer returns.
pub trait TokenTransfer {
    /// Move `amount` from `from` to `to`, spending the allowance `from`
    /// granted to `spender`.
    fn transfer_from(
        &mut self,
        ledger: &mut Ledger,
        contract: ContractId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;

    /// Move `amount` out of `from`'s own holdings to `to`.
    fn transfer(
        &mut self,
        ledger: &mut Ledger,
        contract: ContractId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

#[derive(Debug, Default)]
struct TokenState {
    name: String,
    total_supply: Amount,
    balances: HashMap<AccountId, Amount>,
    /// (owner, spender) -> remaining allowance
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl TokenState {
    fn balance(&self, holder: &AccountId) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    fn move_funds(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let available = self.balance(&from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientFunds {
                required: amount,
                available,
            })?;
        if from == to {
            return Ok(());
        }

        let credited = self.balance(&to).checked_add(amount).ok_or_else(|| {
            TransferError::Rejected {
                reason: "balance overflow".to_string(),
            }
        })?;
        self.balances.insert(from, remaining);
        self.balances.insert(to, credited);
        Ok(())
    }
}

/// In-memory ERC-20 style tokens with an open faucet.
#[derive(Debug, Default)]
pub struct TokenBook {
    tokens: HashMap<ContractId, TokenState>,
}

impl TokenBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a new token contract and return its handle.
    pub fn deploy(&mut self, name: impl Into<String>) -> ContractId {
        let contract = ContractId::new();
        self.tokens.insert(
            contract,
            TokenState {
                name: name.into(),
                ..TokenState::default()
            },
        );
        contract
    }

    /// Mint `amount` to `to`.
    pub fn faucet(
        &mut self,
        contract: ContractId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let state = self.state_mut(contract)?;
        let overflow = || TransferError::Rejected {
            reason: "supply overflow".to_string(),
        };
        // Supply bounds every balance, so only the supply can overflow.
        state.total_supply = state.total_supply.checked_add(amount).ok_or_else(overflow)?;
        let credited = state.balance(&to).checked_add(amount).ok_or_else(overflow)?;
        state.balances.insert(to, credited);
        Ok(())
    }

    /// Set the allowance `owner` grants `spender`, replacing any previous one.
    pub fn approve(
        &mut self,
        contract: ContractId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let state = self.state_mut(contract)?;
        state.allowances.insert((owner, spender), amount);
        Ok(())
    }

    pub fn allowance(&self, contract: ContractId, owner: AccountId, spender: AccountId) -> Amount {
        self.tokens
            .get(&contract)
            .and_then(|state| state.allowances.get(&(owner, spender)).copied())
            .unwrap_or(Amount::ZERO)
    }

    pub fn balance_of(&self, contract: ContractId, holder: AccountId) -> Amount {
        self.tokens
            .get(&contract)
            .map(|state| state.balance(&holder))
            .unwrap_or(Amount::ZERO)
    }

    pub fn total_supply(&self, contract: ContractId) -> Amount {
        self.tokens
            .get(&contract)
            .map(|state| state.total_supply)
            .unwrap_or(Amount::ZERO)
    }

    pub fn name(&self, contract: ContractId) -> Option<&str> {
        self.tokens.get(&contract).map(|state| state.name.as_str())
    }

    fn state_mut(&mut self, contract: ContractId) -> Result<&mut TokenState, TransferError> {
        self.tokens
            .get_mut(&contract)
            .ok_or(TransferError::UnknownContract)
    }
}

impl TokenTransfer for TokenBook {
    fn transfer_from(
        &mut self,
        _ledger: &mut Ledger,
        contract: ContractId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let state = self.state_mut(contract)?;

        let allowed = state
            .allowances
            .get(&(from, spender))
            .copied()
            .unwrap_or(Amount::ZERO);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientAllowance {
                required: amount,
                available: allowed,
            })?;

        state.move_funds(from, to, amount)?;
        state.allowances.insert((from, spender), remaining);
        Ok(())
    }

    fn transfer(
        &mut self,
        _ledger: &mut Ledger,
        contract: ContractId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self.state_mut(contract)?.move_funds(from, to, amount)
    }
}
