//! Access control for administrative operations
//!
//! Registration of tokens is capability-gated: only the current admin
//! account may extend the registry or hand the role to another account.

use types::ids::AccountId;

/// Single-admin access control.
#[derive(Debug, Clone)]
pub struct AccessControl {
    admin: AccountId,
}

impl AccessControl {
    /// Create access control with an initial admin.
    pub fn new(admin: AccountId) -> Self {
        Self { admin }
    }

    /// Check if a caller is admin.
    pub fn is_admin(&self, caller: &AccountId) -> bool {
        self.admin == *caller
    }

    /// Transfer admin to a new account. Returns `false` if `current_admin`
    /// does not hold the role.
    pub fn transfer_admin(&mut self, current_admin: &AccountId, new_admin: AccountId) -> bool {
        if !self.is_admin(current_admin) {
            return false;
        }
        self.admin = new_admin;
        true
    }

    /// Get the current admin.
    pub fn admin(&self) -> AccountId {
        self.admin
    }
}
