//! Transaction processing engine
//!
//! This module provides the `TransactionEngine` that orchestrates every money
//! movement: it validates input, locks the involved accounts in ascending id
//! order, re-checks balances and account roles under lock, applies both
//! balance mutations, and appends the immutable transaction record.
//!
//! # Unit of work
//!
//! Validation, locking, the locked re-read, the balance mutations, and the
//! record append form one atomic unit. Nothing is written to either store
//! until every check has passed, so a failure at any step leaves balances and
//! the ledger exactly as they were; there is no partial state to roll back.
//!
//! The engine spawns no concurrency of its own. It is safe to share between
//! many concurrent callers: stores carry interior synchronization and the
//! lock table serializes units of work that touch the same account.

use crate::config::AdminAccounts;
use crate::core::locking::LockTable;
use crate::core::traits::{AccountStore, TransactionStore};
use crate::types::{
    Account, AccountId, AccountRole, AccountType, LedgerError, NewAccount, Transaction,
    TransactionId, TransactionType,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Transaction processing engine
///
/// Generic over the storage seams so a different backend can replace the
/// in-memory stores. The two fixed administrative accounts are explicit
/// configuration supplied at construction.
pub struct TransactionEngine<A, T>
where
    A: AccountStore,
    T: TransactionStore,
{
    accounts: A,
    transactions: T,
    locks: LockTable,
    admin: AdminAccounts,
}

impl<A, T> TransactionEngine<A, T>
where
    A: AccountStore,
    T: TransactionStore,
{
    /// Create an engine over the given stores and administrative accounts
    ///
    /// The hosting layer resolves which accounts serve as the cash-holding
    /// and cash-disbursement pools before constructing the engine.
    pub fn new(accounts: A, transactions: T, admin: AdminAccounts) -> Self {
        TransactionEngine {
            accounts,
            transactions,
            locks: LockTable::new(),
            admin,
        }
    }

    /// The configured administrative accounts
    pub fn admin_accounts(&self) -> AdminAccounts {
        self.admin
    }

    /// Open a new account
    ///
    /// # Errors
    ///
    /// Returns a validation error if the opening balance is negative or has
    /// more than two fractional digits.
    pub fn create_account(&self, new: NewAccount) -> Result<Account, LedgerError> {
        if new.opening_balance < Decimal::ZERO {
            return Err(LedgerError::NegativeOpeningBalance {
                balance: new.opening_balance,
            });
        }
        if new.opening_balance.normalize().scale() > 2 {
            return Err(LedgerError::too_fine_scale(new.opening_balance));
        }

        let account = self.accounts.create(new);
        info!(
            account = account.id,
            account_type = %account.account_type(),
            "account created"
        );
        Ok(account)
    }

    /// Fetch one account
    pub fn account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// All accounts, sorted by id
    pub fn list_accounts(&self) -> Vec<Account> {
        self.accounts.list()
    }

    /// Fetch one transaction record
    pub fn transaction(&self, id: TransactionId) -> Option<Transaction> {
        self.transactions.get(id)
    }

    /// All transactions where the account is source or destination
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account id does not resolve.
    pub fn transactions_for_account(
        &self,
        account: AccountId,
    ) -> Result<Vec<Transaction>, LedgerError> {
        self.account(account)?;
        Ok(self.transactions.list_by_account(account))
    }

    /// Move funds from the cash-holding pool into a user account
    ///
    /// `source` must be an ACTIVE administrative account with sufficient
    /// balance; `destination` must be an ACTIVE user account.
    pub fn deposit(
        &self,
        amount: Decimal,
        source: AccountId,
        destination: AccountId,
    ) -> Result<Transaction, LedgerError> {
        self.execute(TransactionType::Deposit, amount, source, destination)
    }

    /// Move funds from an account into the cash-disbursement pool
    ///
    /// `source` must be ACTIVE with sufficient balance; `destination` must be
    /// an ACTIVE administrative account.
    pub fn withdraw(
        &self,
        amount: Decimal,
        source: AccountId,
        destination: AccountId,
    ) -> Result<Transaction, LedgerError> {
        self.execute(TransactionType::Withdraw, amount, source, destination)
    }

    /// Move funds between two accounts of any type
    pub fn transfer(
        &self,
        amount: Decimal,
        source: AccountId,
        destination: AccountId,
    ) -> Result<Transaction, LedgerError> {
        self.execute(TransactionType::Transfer, amount, source, destination)
    }

    /// Deposit funded by the configured cash-holding account
    pub fn deposit_from_holding(
        &self,
        amount: Decimal,
        destination: AccountId,
    ) -> Result<Transaction, LedgerError> {
        self.deposit(amount, self.admin.cash_holding, destination)
    }

    /// Withdrawal absorbed by the configured cash-disbursement account
    pub fn withdraw_to_disbursement(
        &self,
        amount: Decimal,
        source: AccountId,
    ) -> Result<Transaction, LedgerError> {
        self.withdraw(amount, source, self.admin.cash_disbursement)
    }

    /// Shared movement algorithm for deposit, withdraw, and transfer
    fn execute(
        &self,
        transaction_type: TransactionType,
        amount: Decimal,
        source: AccountId,
        destination: AccountId,
    ) -> Result<Transaction, LedgerError> {
        // Fail fast on malformed input, before any lock or storage access.
        Self::validate_amount(amount)?;
        if source == destination {
            return Err(LedgerError::same_account(source));
        }

        debug!(
            ?transaction_type,
            %amount,
            source,
            destination,
            "processing movement"
        );

        self.locks.with_locked(&[source, destination], || {
            // Balances read before the locks were taken are stale; every
            // decision below is based on this locked re-read.
            let src = self
                .accounts
                .get(source)
                .ok_or_else(|| LedgerError::account_not_found(source))?;
            let dst = self
                .accounts
                .get(destination)
                .ok_or_else(|| LedgerError::account_not_found(destination))?;

            Self::require_active(&src)?;
            Self::require_active(&dst)?;
            Self::require_roles(transaction_type, &src, &dst)?;

            if src.balance < amount {
                warn!(
                    account = src.id,
                    balance = %src.balance,
                    requested = %amount,
                    "movement rejected: insufficient funds"
                );
                return Err(LedgerError::insufficient_funds(src.id, src.balance, amount));
            }

            // Stage both new balances; the subtraction cannot underflow past
            // the funds check, the addition is guarded against overflow.
            let mut debited = src.clone();
            let mut credited = dst.clone();
            debited.balance = src
                .balance
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("debit", src.id))?;
            credited.balance = dst
                .balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::arithmetic_overflow("credit", dst.id))?;

            // Commit point: both balances and the record land while the
            // locks are still held.
            self.accounts.commit(&[debited, credited]);
            let transaction = self
                .transactions
                .append(amount, transaction_type, source, destination);

            info!(
                transaction = transaction.id,
                ?transaction_type,
                %amount,
                source,
                destination,
                "transaction committed"
            );
            Ok(transaction)
        })
    }

    fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::non_positive_amount(amount));
        }
        // normalize() strips trailing zeros so 1.500 passes and 1.505 fails
        if amount.normalize().scale() > 2 {
            return Err(LedgerError::too_fine_scale(amount));
        }
        Ok(())
    }

    fn require_active(account: &Account) -> Result<(), LedgerError> {
        if !account.is_active() {
            return Err(LedgerError::account_closed(account.id));
        }
        Ok(())
    }

    /// Role constraints per movement kind
    ///
    /// Deposits are funded by an administrative account and credit a user
    /// account; withdrawals are absorbed by an administrative account.
    /// Transfers carry no role constraint.
    fn require_roles(
        transaction_type: TransactionType,
        src: &Account,
        dst: &Account,
    ) -> Result<(), LedgerError> {
        match transaction_type {
            TransactionType::Deposit => {
                if src.account_type() != AccountType::Administrative {
                    return Err(LedgerError::wrong_account_type(
                        src.id,
                        AccountRole::Source,
                        AccountType::Administrative,
                    ));
                }
                if dst.account_type() != AccountType::User {
                    return Err(LedgerError::wrong_account_type(
                        dst.id,
                        AccountRole::Destination,
                        AccountType::User,
                    ));
                }
            }
            TransactionType::Withdraw => {
                if dst.account_type() != AccountType::Administrative {
                    return Err(LedgerError::wrong_account_type(
                        dst.id,
                        AccountRole::Destination,
                        AccountType::Administrative,
                    ));
                }
            }
            TransactionType::Transfer => {}
        }
        Ok(())
    }
}
