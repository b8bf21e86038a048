//! The swap venue the gate forwards admitted requests to.
//!
//! The gate treats the venue as opaque: requests pass through unmodified and
//! receipts come back untouched. Pricing, slippage and routing belong to the
//! venue.

mod recording;
mod router;

pub use recording::RecordingVenue;
pub use router::{AdmissionHook, PluggedRouter};

use crate::core::{AccountId, Amount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// An exact-input, single-hop swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub token_in: AccountId,
    pub token_out: AccountId,
    pub recipient: AccountId,
    pub deadline: DateTime<Utc>,
    pub amount_in: Amount,
    pub amount_out_minimum: Amount,
    /// Price limit for the pool; zero means no limit.
    pub limit_sqrt_price: u128,
    /// Venue-specific routing parameters.
    #[serde(default)]
    pub routing: BTreeMap<String, String>,
}

impl SwapRequest {
    pub fn exact_input(
        token_in: impl Into<AccountId>,
        token_out: impl Into<AccountId>,
        recipient: impl Into<AccountId>,
        amount_in: Amount,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            token_in: token_in.into(),
            token_out: token_out.into(),
            recipient: recipient.into(),
            deadline,
            amount_in,
            amount_out_minimum: 0,
            limit_sqrt_price: 0,
            routing: BTreeMap::new(),
        }
    }

    pub fn with_minimum_out(mut self, amount_out_minimum: Amount) -> Self {
        self.amount_out_minimum = amount_out_minimum;
        self
    }

    pub fn with_route(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.routing.insert(key.into(), value.into());
        self
    }
}

/// What the venue reports after executing a swap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    pub recipient: AccountId,
    pub token_out: AccountId,
    pub amount_in: Amount,
    pub amount_out: Amount,
    pub executed_at: DateTime<Utc>,
}

/// Failures reported by a venue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VenueError {
    #[error("Swap deadline {deadline} has passed")]
    DeadlineExpired { deadline: DateTime<Utc> },

    #[error("Swap output {amount_out} below minimum {minimum}")]
    InsufficientOutput { amount_out: Amount, minimum: Amount },

    #[error("Venue rejected swap: {0}")]
    Rejected(String),
}

/// Facility that actually executes swaps.
pub trait SwapVenue: Send + Sync {
    fn swap(&self, trader: &AccountId, request: &SwapRequest) -> Result<SwapReceipt, VenueError>;
}
