//! Contract Logic for Multi-Token Custody
//!
//! This crate implements the accounting core of the exchange: a registry of
//! accepted tokens and a ledger that custodies them on behalf of traders.
//!
//! # Modules
//! - `events`: Ledger events for off-system auditors
//! - `errors`: Contract-specific error types
//! - `security`: Admin access control
//! - `registry`: Token id to token contract mapping
//! - `token`: External token transfer capability and in-memory token book
//! - `ledger`: Per-trader balances, deposit and withdraw
//! - `config`: Setup configuration
//!
//! # Version
//! v0.1.0

pub mod errors;
pub mod events;
pub mod security;
pub mod registry;
pub mod token;
pub mod ledger;
pub mod config;
