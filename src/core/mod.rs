//! Core business logic module
//!
//! This module contains the ledger's moving parts:
//! - `traits` - Storage seams any backend must satisfy
//! - `engine` - Transaction orchestration: validate, lock, mutate, record
//! - `account_store` - In-memory account persistence
//! - `transaction_store` - In-memory append-only ledger
//! - `locking` - Per-account lock table with ordered acquisition

pub mod account_store;
pub mod engine;
pub mod locking;
pub mod traits;
pub mod transaction_store;

pub use account_store::MemoryAccountStore;
pub use engine::TransactionEngine;
pub use locking::LockTable;
pub use traits::{AccountStore, TransactionStore};
pub use transaction_store::MemoryTransactionStore;
