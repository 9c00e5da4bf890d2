//! In-memory account store
//!
//! `MemoryAccountStore` keeps accounts in a concurrent map keyed by id.
//! Ids come from an atomic counter; account numbers are twelve uppercase hex
//! characters drawn from a v4 UUID.
//!
//! The store itself is only a map. Exclusivity across a whole unit of work
//! is the engine's job, via the [`LockTable`](crate::core::locking::LockTable);
//! the store's contract is that `commit` is immediately visible to the next
//! `get` of the same account.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, NewAccount};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Concurrent in-memory implementation of [`AccountStore`]
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<AccountId, Account>,
    next_id: AtomicU64,
}

impl MemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryAccountStore {
            accounts: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    fn generate_account_number() -> String {
        Uuid::new_v4().simple().to_string()[..12].to_uppercase()
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).map(|entry| entry.value().clone())
    }

    fn list(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        accounts
    }

    fn create(&self, new: NewAccount) -> Account {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let account = Account {
            id,
            account_number: Self::generate_account_number(),
            balance: new.opening_balance,
            status: new.status,
            owner: new.owner,
            created_at: Utc::now(),
        };
        self.accounts.insert(id, account.clone());
        account
    }

    fn commit(&self, accounts: &[Account]) {
        for account in accounts {
            self.accounts.insert(account.id, account.clone());
        }
    }
}
