//! Transaction-related types for the ledger core
//!
//! A transaction is the immutable record of one committed money movement.
//! Together the records form an append-only ledger: they are created exactly
//! once by the transaction engine and never updated or deleted.

use super::account::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier, assigned by the transaction store at commit
pub type TransactionId = u64;

/// Kinds of money movement recorded in the ledger
///
/// All three debit the source account and credit the destination account by
/// the same amount; they differ only in which account roles are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Cash-holding (administrative) account funds a user account
    Deposit,

    /// A user account pays out to the cash-disbursement (administrative) account
    Withdraw,

    /// Movement between two accounts of any type
    Transfer,
}

/// Immutable record of a committed money movement
///
/// For every committed transaction, the source balance decreased and the
/// destination balance increased by `amount`, and both mutations were
/// persisted atomically with this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier, immutable
    pub id: TransactionId,

    /// Strictly positive amount with at most two fractional digits
    pub amount: Decimal,

    /// Kind of movement
    pub transaction_type: TransactionType,

    /// Account debited
    pub source_account_id: AccountId,

    /// Account credited
    pub destination_account_id: AccountId,

    /// Commit time, assigned by the store
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Whether the given account is the source or destination of this movement
    pub fn involves(&self, account: AccountId) -> bool {
        self.source_account_id == account || self.destination_account_id == account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_involves_matches_source_and_destination() {
        let tx = Transaction {
            id: 1,
            amount: dec!(25.00),
            transaction_type: TransactionType::Transfer,
            source_account_id: 10,
            destination_account_id: 20,
            created_at: Utc::now(),
        };

        assert!(tx.involves(10));
        assert!(tx.involves(20));
        assert!(!tx.involves(30));
    }
}
