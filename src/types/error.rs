//! Error types for the ledger core
//!
//! This module defines every failure the transaction engine can report.
//! Each variant carries the context the calling layer needs to build a
//! user-facing response, and [`LedgerError::kind`] classifies variants into
//! the response categories the caller maps to.
//!
//! Business-rule violations are ordinary `Err` values, never panics: the
//! engine propagates them with `?` and guarantees that no store write has
//! happened by the time an error reaches the caller.

use super::account::{AccountId, AccountType};
use rust_decimal::Decimal;
use thiserror::Error;

/// Which side of a movement an account sits on, used in error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Source,
    Destination,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Source => "source",
            AccountRole::Destination => "destination",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse classification of a [`LedgerError`]
///
/// The request-handling layer maps these to response classes: `Validation`
/// and `InsufficientFunds` become client errors, `NotFound` a not-found
/// response, and `Internal` a generic server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    InsufficientFunds,
    Internal,
}

/// Main error type for the ledger core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is zero or negative
    ///
    /// Rejected before any lock is taken or any storage is touched.
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Amount carries more than two fractional digits
    ///
    /// Balances are fixed-point with two fractional digits; finer amounts
    /// are rejected rather than silently rounded.
    #[error("Amount {amount} has more than two decimal places")]
    TooFineScale {
        /// The offending amount
        amount: Decimal,
    },

    /// Opening balance of a new account is negative
    #[error("Opening balance must not be negative, got {balance}")]
    NegativeOpeningBalance {
        /// The offending opening balance
        balance: Decimal,
    },

    /// A referenced account id does not exist
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The unresolved account id
        account: AccountId,
    },

    /// The account is closed and cannot participate in transactions
    #[error("Account {account} is closed")]
    AccountClosed {
        /// The closed account id
        account: AccountId,
    },

    /// An account has the wrong type for its role in the operation
    ///
    /// Deposits require an administrative source and a user destination;
    /// withdrawals require an administrative destination.
    #[error("The {role} account {account} must be of type {expected}")]
    WrongAccountType {
        /// The offending account id
        account: AccountId,
        /// Role the account plays in the operation
        role: AccountRole,
        /// Required account type for that role
        expected: AccountType,
    },

    /// Source and destination reference the same account
    #[error("Source and destination are the same account ({account})")]
    SameAccount {
        /// The duplicated account id
        account: AccountId,
    },

    /// Source balance is insufficient at the time of the locked check
    #[error(
        "Insufficient funds in account {account}: balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        /// The debited account id
        account: AccountId,
        /// Balance observed under lock
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Arithmetic overflow would occur in balance math
    ///
    /// The operation is rejected to keep account state intact.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// The affected account id
        account: AccountId,
    },
}

impl LedgerError {
    /// Classify this error for the calling layer
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NonPositiveAmount { .. }
            | LedgerError::TooFineScale { .. }
            | LedgerError::NegativeOpeningBalance { .. }
            | LedgerError::AccountClosed { .. }
            | LedgerError::WrongAccountType { .. }
            | LedgerError::SameAccount { .. } => ErrorKind::Validation,
            LedgerError::AccountNotFound { .. } => ErrorKind::NotFound,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::ArithmeticOverflow { .. } => ErrorKind::Internal,
        }
    }

    /// Create a NonPositiveAmount error
    pub fn non_positive_amount(amount: Decimal) -> Self {
        LedgerError::NonPositiveAmount { amount }
    }

    /// Create a TooFineScale error
    pub fn too_fine_scale(amount: Decimal) -> Self {
        LedgerError::TooFineScale { amount }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        LedgerError::AccountNotFound { account }
    }

    /// Create an AccountClosed error
    pub fn account_closed(account: AccountId) -> Self {
        LedgerError::AccountClosed { account }
    }

    /// Create a WrongAccountType error
    pub fn wrong_account_type(account: AccountId, role: AccountRole, expected: AccountType) -> Self {
        LedgerError::WrongAccountType {
            account,
            role,
            expected,
        }
    }

    /// Create a SameAccount error
    pub fn same_account(account: AccountId) -> Self {
        LedgerError::SameAccount { account }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account,
            balance,
            requested,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::non_positive_amount(
        LedgerError::NonPositiveAmount { amount: dec!(-5.00) },
        "Amount must be positive, got -5.00"
    )]
    #[case::too_fine_scale(
        LedgerError::TooFineScale { amount: dec!(1.005) },
        "Amount 1.005 has more than two decimal places"
    )]
    #[case::negative_opening_balance(
        LedgerError::NegativeOpeningBalance { balance: dec!(-1.00) },
        "Opening balance must not be negative, got -1.00"
    )]
    #[case::account_not_found(
        LedgerError::AccountNotFound { account: 42 },
        "Account 42 not found"
    )]
    #[case::account_closed(
        LedgerError::AccountClosed { account: 7 },
        "Account 7 is closed"
    )]
    #[case::wrong_account_type(
        LedgerError::WrongAccountType {
            account: 3,
            role: AccountRole::Source,
            expected: AccountType::Administrative,
        },
        "The source account 3 must be of type ADMINISTRATIVE"
    )]
    #[case::same_account(
        LedgerError::SameAccount { account: 9 },
        "Source and destination are the same account (9)"
    )]
    #[case::insufficient_funds(
        LedgerError::InsufficientFunds { account: 1, balance: dec!(500.00), requested: dec!(2000.00) },
        "Insufficient funds in account 1: balance 500.00, requested 2000.00"
    )]
    #[case::arithmetic_overflow(
        LedgerError::ArithmeticOverflow { operation: "transfer".to_string(), account: 1 },
        "Arithmetic overflow in transfer for account 1"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::non_positive(LedgerError::non_positive_amount(dec!(0)), ErrorKind::Validation)]
    #[case::scale(LedgerError::too_fine_scale(dec!(0.001)), ErrorKind::Validation)]
    #[case::closed(LedgerError::account_closed(1), ErrorKind::Validation)]
    #[case::same(LedgerError::same_account(1), ErrorKind::Validation)]
    #[case::wrong_type(
        LedgerError::wrong_account_type(1, AccountRole::Destination, AccountType::User),
        ErrorKind::Validation
    )]
    #[case::not_found(LedgerError::account_not_found(99), ErrorKind::NotFound)]
    #[case::funds(
        LedgerError::insufficient_funds(1, dec!(1.00), dec!(2.00)),
        ErrorKind::InsufficientFunds
    )]
    #[case::overflow(LedgerError::arithmetic_overflow("deposit", 1), ErrorKind::Internal)]
    fn test_error_kind_classification(#[case] error: LedgerError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[test]
    fn test_helper_constructors_build_expected_variants() {
        assert_eq!(
            LedgerError::insufficient_funds(5, dec!(10.00), dec!(20.00)),
            LedgerError::InsufficientFunds {
                account: 5,
                balance: dec!(10.00),
                requested: dec!(20.00),
            }
        );
        assert_eq!(
            LedgerError::arithmetic_overflow("withdraw", 3),
            LedgerError::ArithmeticOverflow {
                operation: "withdraw".to_string(),
                account: 3,
            }
        );
    }
}
