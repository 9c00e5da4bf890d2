//! Storage trait seams for the ledger core
//!
//! The engine is generic over these traits so a relational or other backend
//! can replace the in-memory stores without touching the engine. All methods
//! take `&self`: a store is shared by many concurrent callers and must carry
//! its own interior synchronization.

use crate::types::{Account, AccountId, NewAccount, Transaction, TransactionId, TransactionType};
use rust_decimal::Decimal;

/// Persistence seam for accounts
///
/// `get` and `list` are plain reads for display; the engine never bases a
/// balance decision on them. Balance decisions are made on a `get` performed
/// while the engine holds the account's lock, and the resulting states are
/// written back through `commit` before the lock is released.
pub trait AccountStore {
    /// Fetch one account, if it exists
    fn get(&self, id: AccountId) -> Option<Account>;

    /// All accounts, sorted by id for deterministic output
    fn list(&self) -> Vec<Account>;

    /// Insert a new account, assigning its id and account number
    fn create(&self, new: NewAccount) -> Account;

    /// Write back engine-staged account states
    ///
    /// Called only by the engine, only while it holds the locks of every
    /// account in the slice. The write must be visible to the next locked
    /// `get` of those accounts.
    fn commit(&self, accounts: &[Account]);
}

/// Persistence seam for the append-only transaction ledger
pub trait TransactionStore {
    /// Append one immutable record, assigning its id and timestamp
    ///
    /// Called only from inside the engine's locked section so the record and
    /// the balance writes land as one atomic unit.
    fn append(
        &self,
        amount: Decimal,
        transaction_type: TransactionType,
        source: AccountId,
        destination: AccountId,
    ) -> Transaction;

    /// Fetch one record, if it exists
    fn get(&self, id: TransactionId) -> Option<Transaction>;

    /// All records where the account is source or destination, ordered by id
    fn list_by_account(&self, account: AccountId) -> Vec<Transaction>;
}
