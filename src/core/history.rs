//! Journal of gate events.
//!
//! Every committed state change on the gate is appended here with the time
//! it happened. Failed operations leave no entry.

use super::account::{AccountId, Amount};
use super::expiry::Expiry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// A committed change to gate state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateEvent {
    /// A subscriber paid `price` and is admitted until `expiry`.
    Subscribed {
        account: AccountId,
        price: Amount,
        expiry: Expiry,
    },
    /// The admin swept the custody balance.
    Withdrawn { admin: AccountId, amount: Amount },
    /// An admitted swap was handed to the venue and completed.
    SwapForwarded {
        account: AccountId,
        amount_in: Amount,
        amount_out: Amount,
    },
}

impl GateEvent {
    /// The identity that caused this event.
    pub fn actor(&self) -> &AccountId {
        match self {
            Self::Subscribed { account, .. } => account,
            Self::Withdrawn { admin, .. } => admin,
            Self::SwapForwarded { account, .. } => account,
        }
    }
}

/// A `GateEvent` stamped with the time it was committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event: GateEvent,
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of gate events.
///
/// `record` is pure and returns a new log; the gate itself appends in place
/// while holding its state lock.
///
/// A bounded log keeps only its newest `capacity` entries. Fee and
/// withdrawal totals are running sums and survive eviction.
///
/// # Example
///
/// ```rust
/// use swapgate::core::{AccountId, EventLog, GateEvent};
/// use chrono::Utc;
///
/// let log = EventLog::new();
/// let log = log.record(
///     GateEvent::Withdrawn { admin: AccountId::from("admin"), amount: 10 },
///     Utc::now(),
/// );
///
/// assert_eq!(log.entries().len(), 1);
/// assert_eq!(log.total_withdrawn(), 10);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<RecordedEvent>,
    capacity: Option<usize>,
    collected: Amount,
    withdrawn: Amount,
    evicted: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that retains at most `capacity` entries.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Record an event, returning a new log. The original is unchanged.
    pub fn record(&self, event: GateEvent, timestamp: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.push(event, timestamp);
        next
    }

    pub(crate) fn push(&mut self, event: GateEvent, timestamp: DateTime<Utc>) {
        match &event {
            GateEvent::Subscribed { price, .. } => {
                self.collected = self.collected.saturating_add(*price)
            }
            GateEvent::Withdrawn { amount, .. } => {
                self.withdrawn = self.withdrawn.saturating_add(*amount)
            }
            GateEvent::SwapForwarded { .. } => {}
        }
        self.entries.push_back(RecordedEvent { event, timestamp });
        self.evict();
    }

    /// Change the retention bound, dropping the oldest entries if needed.
    pub(crate) fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
        self.evict();
    }

    fn evict(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.entries.len() > capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> &VecDeque<RecordedEvent> {
        &self.entries
    }

    /// The newest `limit` retained entries, oldest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &RecordedEvent> {
        self.entries
            .iter()
            .skip(self.entries.len().saturating_sub(limit))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Entries dropped to stay within capacity.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Retained events caused by `account`, oldest first.
    pub fn for_account<'a>(
        &'a self,
        account: &'a AccountId,
    ) -> impl Iterator<Item = &'a RecordedEvent> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.event.actor() == account)
    }

    /// Sum of every subscription fee ever recorded, evicted entries included.
    pub fn total_collected(&self) -> Amount {
        self.collected
    }

    /// Sum of every admin withdrawal ever recorded, evicted entries included.
    pub fn total_withdrawn(&self) -> Amount {
        self.withdrawn
    }

    /// Time between the oldest and newest retained event.
    ///
    /// Returns `None` for an empty log.
    pub fn span(&self) -> Option<Duration> {
        let (first, last) = (self.entries.front()?, self.entries.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
