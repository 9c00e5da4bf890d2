//! Core data types for the ledger
//!
//! This module defines the account and transaction models and the error
//! taxonomy shared by the stores and the engine.

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{
    Account, AccountId, AccountOwner, AccountStatus, AccountType, CustomerId, EntityId, NewAccount,
};
pub use error::{AccountRole, ErrorKind, LedgerError};
pub use transaction::{Transaction, TransactionId, TransactionType};
