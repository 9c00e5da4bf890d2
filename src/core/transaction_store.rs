//! In-memory transaction ledger
//!
//! `MemoryTransactionStore` holds the append-only record of committed money
//! movements. Records are inserted exactly once by the engine, inside its
//! locked section, and are never updated or deleted afterwards.

use crate::core::traits::TransactionStore;
use crate::types::{AccountId, Transaction, TransactionId, TransactionType};
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Concurrent in-memory implementation of [`TransactionStore`]
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: DashMap<TransactionId, Transaction>,
    next_id: AtomicU64,
}

impl MemoryTransactionStore {
    /// Create an empty ledger
    pub fn new() -> Self {
        MemoryTransactionStore {
            transactions: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn append(
        &self,
        amount: Decimal,
        transaction_type: TransactionType,
        source: AccountId,
        destination: AccountId,
    ) -> Transaction {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let transaction = Transaction {
            id,
            amount,
            transaction_type,
            source_account_id: source,
            destination_account_id: destination,
            created_at: Utc::now(),
        };
        self.transactions.insert(id, transaction.clone());
        transaction
    }

    fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.transactions.get(&id).map(|entry| entry.value().clone())
    }

    fn list_by_account(&self, account: AccountId) -> Vec<Transaction> {
        let mut matching: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|entry| entry.value().involves(account))
            .map(|entry| entry.value().clone())
            .collect();
        matching.sort_by_key(|tx| tx.id);
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_append_assigns_sequential_ids_and_timestamp() {
        let store = MemoryTransactionStore::new();

        let first = store.append(dec!(100.00), TransactionType::Deposit, 1, 2);
        let second = store.append(dec!(50.00), TransactionType::Transfer, 2, 3);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);
    }

    #[test]
    fn test_get_returns_appended_record() {
        let store = MemoryTransactionStore::new();

        let tx = store.append(dec!(10.00), TransactionType::Withdraw, 5, 6);

        assert_eq!(store.get(tx.id), Some(tx));
        assert_eq!(store.get(99), None);
    }

    #[test]
    fn test_list_by_account_matches_either_side() {
        let store = MemoryTransactionStore::new();

        store.append(dec!(100.00), TransactionType::Deposit, 1, 2);
        store.append(dec!(30.00), TransactionType::Transfer, 2, 3);
        store.append(dec!(20.00), TransactionType::Transfer, 3, 4);

        let for_two: Vec<TransactionId> =
            store.list_by_account(2).iter().map(|tx| tx.id).collect();
        assert_eq!(for_two, vec![1, 2]);

        assert!(store.list_by_account(9).is_empty());
    }

    #[test]
    fn test_list_by_account_is_ordered_by_id() {
        let store = MemoryTransactionStore::new();

        for _ in 0..5 {
            store.append(dec!(1.00), TransactionType::Transfer, 1, 2);
        }

        let ids: Vec<TransactionId> = store.list_by_account(1).iter().map(|tx| tx.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
