//! Engine configuration
//!
//! The bank runs two fixed administrative accounts: a cash-holding pool that
//! funds deposits and a cash-disbursement pool that absorbs withdrawals.
//! Their ids are resolved by the hosting layer and handed to the engine at
//! construction time; the engine never discovers them from ambient state.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};

/// Identifiers of the two fixed administrative accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccounts {
    /// Account funding deposits
    pub cash_holding: AccountId,

    /// Account absorbing withdrawals
    pub cash_disbursement: AccountId,
}

impl AdminAccounts {
    pub fn new(cash_holding: AccountId, cash_disbursement: AccountId) -> Self {
        AdminAccounts {
            cash_holding,
            cash_disbursement,
        }
    }
}
