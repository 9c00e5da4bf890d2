//! Account-related types for the ledger core
//!
//! This module defines the Account structure, its ownership model, and the
//! request type used to open new accounts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier, assigned by the account store at creation
pub type AccountId = u64;

/// Identifier of the customer owning a user account
pub type CustomerId = u64;

/// Identifier of the administrative entity owning an administrative account
pub type EntityId = u64;

/// Role an account plays in the bank
///
/// User accounts belong to customers. Administrative accounts belong to
/// administrative entities (cash-holding and cash-disbursement pools) and
/// act as the counterparty for deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Customer-owned account
    User,
    /// Bank-owned counterparty account
    Administrative,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::User => "USER",
            AccountType::Administrative => "ADMINISTRATIVE",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of an account
///
/// Accounts are never deleted; they transition to `Closed` instead.
/// Closed accounts cannot participate in transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Active,
    Closed,
}

/// Owner reference of an account
///
/// Exactly one owner kind is set per account, and the account's type is
/// derived from it, so an account with both a customer and an administrative
/// entity owner cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountOwner {
    Customer(CustomerId),
    AdministrativeEntity(EntityId),
}

impl AccountOwner {
    /// The account type implied by this owner
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountOwner::Customer(_) => AccountType::User,
            AccountOwner::AdministrativeEntity(_) => AccountType::Administrative,
        }
    }
}

/// A bank account
///
/// The balance is a fixed-point decimal with two fractional digits and is
/// mutated only by the transaction engine while the account's lock is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier, immutable once assigned
    pub id: AccountId,

    /// Unique human-facing identifier, generated at creation, immutable
    pub account_number: String,

    /// Current balance, never negative after a committed transaction
    pub balance: Decimal,

    /// Lifecycle status
    pub status: AccountStatus,

    /// Owning customer or administrative entity
    pub owner: AccountOwner,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The account type derived from the owner reference
    pub fn account_type(&self) -> AccountType {
        self.owner.account_type()
    }

    /// Whether the account may participate in transactions
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// Request to open a new account
///
/// The id and account number are assigned by the store; everything else is
/// supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub owner: AccountOwner,
    pub status: AccountStatus,
    pub opening_balance: Decimal,
}

impl NewAccount {
    /// An active customer-owned account
    pub fn user(customer: CustomerId, opening_balance: Decimal) -> Self {
        NewAccount {
            owner: AccountOwner::Customer(customer),
            status: AccountStatus::Active,
            opening_balance,
        }
    }

    /// An active administrative account (cash-holding or cash-disbursement pool)
    pub fn administrative(entity: EntityId, opening_balance: Decimal) -> Self {
        NewAccount {
            owner: AccountOwner::AdministrativeEntity(entity),
            status: AccountStatus::Active,
            opening_balance,
        }
    }
}
