//! Types library for the exchange custody ledger
//!
//! Core type definitions shared by the ledger contracts, ensuring type safety
//! and deterministic arithmetic.
//!
//! # Version
//! v1.0.0
//!
//! # Modules
//! - `ids`: Identifiers (AccountId, ContractId, TokenId)
//! - `numeric`: Token quantities and decimal unit conversion
//! - `errors`: Construction errors

// Public modules
pub mod ids;
pub mod numeric;
pub mod errors;
