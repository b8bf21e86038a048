//! Errors returned by gate operations.

use crate::core::{AccountId, Expiry};
use crate::ledger::LedgerError;
use crate::venue::VenueError;
use thiserror::Error;

/// Errors that can occur during gate operations.
///
/// Every variant is reported synchronously to the caller of the failing
/// operation, and a failed operation leaves gate state untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("'{account}' already holds a subscription valid until {expiry}")]
    AlreadySubscribed { account: AccountId, expiry: Expiry },

    #[error("Subscription required: '{account}' has no active subscription")]
    SubscriptionRequired { account: AccountId },

    #[error("Subscription fee transfer failed: {0}")]
    TransferFailed(#[source] LedgerError),

    #[error("'{caller}' is not authorized to withdraw")]
    Unauthorized { caller: AccountId },

    #[error("No swap venue configured for this gate")]
    VenueNotConfigured,

    #[error("Venue failed: {0}")]
    Venue(#[source] VenueError),

    #[error("Subscription expiry is not representable")]
    ExpiryOverflow,

    #[error("Gated swap already in flight for '{account}'")]
    Reentrant { account: AccountId },
}

impl GateError {
    /// True when the caller can fix the failure and retry.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unauthorized { .. } | Self::VenueNotConfigured)
    }
}
