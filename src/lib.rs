//! Ledger Core Library
//! # Overview
//!
//! This library is the double-entry ledger core of a minimal banking service:
//! accounts plus an append-only transaction log, mutated only by a
//! transaction engine that is safe to call from many concurrent requests.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, errors)
//! - [`config`] - The two fixed administrative accounts, passed in explicitly
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Movement orchestration: validate, lock, mutate, record
//!   - [`core::locking`] - Per-account lock table with ascending-id acquisition
//!   - [`core::account_store`] / [`core::transaction_store`] - In-memory stores
//!   - [`core::traits`] - Storage seams for alternative backends
//!
//! # Movements
//!
//! The engine supports three movement kinds, each debiting a source account
//! and crediting a destination account atomically:
//!
//! - **Deposit**: the cash-holding (administrative) account funds a user account
//! - **Withdraw**: a user account pays out to the cash-disbursement (administrative) account
//! - **Transfer**: movement between two accounts of any type
//!
//! # Consistency
//!
//! Every movement locks the involved accounts in ascending id order,
//! re-reads balances under lock, and writes both balances plus the record
//! before releasing the locks. A failure at any step leaves no trace: no
//! store write happens until all validation has passed.

// Module declarations
pub mod config;
pub mod core;
pub mod types;

pub use config::AdminAccounts;
pub use core::{
    AccountStore, LockTable, MemoryAccountStore, MemoryTransactionStore, TransactionEngine,
    TransactionStore,
};
pub use types::{
    Account, AccountId, AccountOwner, AccountRole, AccountStatus, AccountType, CustomerId,
    EntityId, ErrorKind, LedgerError, NewAccount, Transaction, TransactionId, TransactionType,
};
