//! Token Registry — symbolic token ids mapped to external token contracts
//!
//! Lifecycle: created empty, populated by the admin at setup time, then
//! read-only in steady state. Entries are never removed or rebound.

use std::collections::HashMap;

use types::ids::{AccountId, ContractId, TokenId};
use tracing::{info, warn};

use crate::errors::RegistryError;
use crate::security::AccessControl;

/// A registered token and the contract backing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenEntry {
    pub token: TokenId,
    pub contract: ContractId,
}

/// Authoritative list of tokens the ledger accepts.
#[derive(Debug)]
pub struct TokenRegistry {
    /// token -> backing contract
    contracts: HashMap<TokenId, ContractId>,
    /// Registration order
    order: Vec<TokenId>,
    access_control: AccessControl,
}

impl TokenRegistry {
    /// Create an empty registry administered by `admin`.
    pub fn new(admin: AccountId) -> Self {
        Self {
            contracts: HashMap::new(),
            order: Vec::new(),
            access_control: AccessControl::new(admin),
        }
    }

    /// Register `token` as backed by `contract`. Admin-only.
    ///
    /// An id can be bound once; a second registration fails with
    /// `AlreadyRegistered` even when it names the same contract.
    pub fn register(
        &mut self,
        caller: &AccountId,
        token: TokenId,
        contract: ContractId,
    ) -> Result<(), RegistryError> {
        if !self.access_control.is_admin(caller) {
            warn!(%caller, %token, "Rejected token registration from non-admin");
            return Err(RegistryError::Unauthorized);
        }
        if self.contracts.contains_key(&token) {
            warn!(%token, "Rejected duplicate token registration");
            return Err(RegistryError::AlreadyRegistered { token });
        }

        self.contracts.insert(token, contract);
        self.order.push(token);
        info!(%token, %contract, "Token registered");
        Ok(())
    }

    /// Look up the contract backing `token`.
    pub fn resolve(&self, token: &TokenId) -> Result<ContractId, RegistryError> {
        self.contracts
            .get(token)
            .copied()
            .ok_or(RegistryError::InvalidToken { token: *token })
    }

    pub fn is_registered(&self, token: &TokenId) -> bool {
        self.contracts.contains_key(token)
    }

    /// All entries in registration order.
    pub fn tokens(&self) -> Vec<TokenEntry> {
        self.order
            .iter()
            .filter_map(|token| {
                self.contracts.get(token).map(|contract| TokenEntry {
                    token: *token,
                    contract: *contract,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Hand the registration capability to another account.
    pub fn transfer_admin(
        &mut self,
        caller: &AccountId,
        new_admin: AccountId,
    ) -> Result<(), RegistryError> {
        if !self.access_control.transfer_admin(caller, new_admin) {
            return Err(RegistryError::Unauthorized);
        }
        info!(%new_admin, "Registry admin transferred");
        Ok(())
    }

    pub fn admin(&self) -> AccountId {
        self.access_control.admin()
    }
}
