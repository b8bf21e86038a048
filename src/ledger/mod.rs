//! The fungible-asset ledger the gate collects fees through.
//!
//! The gate only needs three operations from a ledger: a balance query, a
//! transfer of its own funds, and a pull-transfer from a subscriber that
//! has pre-authorised the gate.

mod memory;

pub use memory::InMemoryLedger;

use crate::core::{AccountId, Amount};
use thiserror::Error;

/// Failures reported by a ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance: '{account}' holds {available}, needs {required}")]
    InsufficientBalance {
        account: AccountId,
        available: Amount,
        required: Amount,
    },

    #[error("Insufficient allowance: '{spender}' may move {allowed} from '{owner}', needs {required}")]
    InsufficientAllowance {
        owner: AccountId,
        spender: AccountId,
        allowed: Amount,
        required: Amount,
    },

    #[error("Ledger rejected transfer: {0}")]
    Rejected(String),
}

/// Account system holding the payment asset.
///
/// Implementations must apply each transfer atomically: on `Err` no balance
/// or allowance has changed.
pub trait Ledger: Send + Sync {
    /// Current balance of `account`.
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Move `amount` out of `from`, authorised by `from` itself.
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount)
        -> Result<(), LedgerError>;

    /// Move `amount` out of `from` on behalf of `spender`, consuming
    /// allowance that `from` granted to `spender`.
    fn transfer_from(
        &self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}
