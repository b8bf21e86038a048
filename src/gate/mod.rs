//! The subscription gate.
//!
//! [`SubscriptionGate`] owns the subscriber → expiry map and the custody
//! account. It sells time-window subscriptions for a fixed price, admits
//! only active subscribers to the venue, and lets the admin sweep collected
//! fees.
//!
//! # Locking
//!
//! One mutex guards the subscriber map and the event log. `subscribe` and
//! `withdraw` hold it across their ledger calls, so neither can interleave
//! with the other or with another subscribe. Admission checks take the same
//! lock briefly and therefore see every committed subscribe.
//!
//! `execute_gated_swap` is two-phase: admission is fully evaluated and the
//! lock released before control passes to the venue. A per-caller in-flight
//! marker refuses a nested gated swap for the same caller.

mod error;
mod reentrancy;

pub use error::GateError;

use crate::builder::GateBuilder;
use crate::clock::Clock;
use crate::config::GateConfig;
use crate::core::{
    AccountId, Amount, EventLog, Expiry, GateEvent, Guard, RecordedEvent, SubscriptionStatus,
};
use crate::ledger::Ledger;
use crate::venue::{AdmissionHook, SwapReceipt, SwapRequest, SwapVenue};
use parking_lot::Mutex;
use reentrancy::InFlight;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub(crate) struct GateState {
    pub(crate) subscribers: HashMap<AccountId, Expiry>,
    pub(crate) events: EventLog,
}

impl GateState {
    fn expiry_of(&self, account: &AccountId) -> Expiry {
        self.subscribers.get(account).copied().unwrap_or_default()
    }
}

/// Subscription-gated admission control in front of a swap venue.
pub struct SubscriptionGate {
    config: GateConfig,
    ledger: Arc<dyn Ledger>,
    venue: Option<Arc<dyn SwapVenue>>,
    clock: Arc<dyn Clock>,
    admission: Guard<SubscriptionStatus>,
    state: Mutex<GateState>,
    in_flight: InFlight,
}

impl SubscriptionGate {
    pub fn builder() -> GateBuilder {
        GateBuilder::new()
    }

    pub(crate) fn from_parts(
        config: GateConfig,
        ledger: Arc<dyn Ledger>,
        venue: Option<Arc<dyn SwapVenue>>,
        clock: Arc<dyn Clock>,
        mut state: GateState,
    ) -> Self {
        state.events.set_capacity(config.journal_capacity);
        Self {
            config,
            ledger,
            venue,
            clock,
            admission: Guard::admission(),
            state: Mutex::new(state),
            in_flight: InFlight::default(),
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn admin(&self) -> &AccountId {
        &self.config.admin
    }

    pub fn price(&self) -> Amount {
        self.config.price
    }

    pub fn duration_secs(&self) -> u64 {
        self.config.duration_secs
    }

    /// Expiry of `account`; [`Expiry::NEVER`] if it never subscribed.
    pub fn subscription_expiry(&self, account: &AccountId) -> Expiry {
        self.state.lock().expiry_of(account)
    }

    pub fn status(&self, account: &AccountId) -> SubscriptionStatus {
        let expiry = self.subscription_expiry(account);
        SubscriptionStatus::at(&expiry, self.clock.now())
    }

    /// Admission check: true iff `now < expiry(account)`.
    pub fn is_active(&self, account: &AccountId) -> bool {
        self.admission.check(&self.status(account))
    }

    /// Gate's current holding of the payment asset.
    pub fn custody_balance(&self) -> Amount {
        self.ledger.balance_of(&self.config.gate_account)
    }

    /// Copy of the retained event journal.
    ///
    /// Clones every retained entry under the state lock; prefer
    /// [`recent_events`](Self::recent_events) on a busy gate.
    pub fn events(&self) -> EventLog {
        self.state.lock().events.clone()
    }

    /// The newest `limit` journal entries, oldest first.
    pub fn recent_events(&self, limit: usize) -> Vec<RecordedEvent> {
        self.state.lock().events.recent(limit).cloned().collect()
    }

    /// Buy a subscription for `caller`.
    ///
    /// Pulls exactly `price` from `caller` and, only once the pull has
    /// succeeded, sets `expiry = now + duration`. Fails with
    /// [`GateError::AlreadySubscribed`] while `caller` is still active.
    pub fn subscribe(&self, caller: &AccountId) -> Result<Expiry, GateError> {
        let mut state = self.state.lock();
        let now = self.clock.now();

        let current = state.expiry_of(caller);
        if current.is_active_at(now) {
            warn!(account = %caller, expiry = %current, "subscribe refused: already active");
            return Err(GateError::AlreadySubscribed {
                account: caller.clone(),
                expiry: current,
            });
        }

        let expiry =
            Expiry::starting_at(now, self.config.duration_secs).ok_or(GateError::ExpiryOverflow)?;

        let gate = &self.config.gate_account;
        self.ledger
            .transfer_from(gate, caller, gate, self.config.price)
            .map_err(|err| {
                warn!(account = %caller, error = %err, "subscription fee pull failed");
                GateError::TransferFailed(err)
            })?;

        state.subscribers.insert(caller.clone(), expiry);
        state.events.push(
            GateEvent::Subscribed {
                account: caller.clone(),
                price: self.config.price,
                expiry,
            },
            now,
        );
        info!(account = %caller, price = self.config.price, expiry = %expiry, "subscribed");
        Ok(expiry)
    }

    /// Fail with [`GateError::SubscriptionRequired`] unless `caller` is active.
    pub fn admit(&self, caller: &AccountId) -> Result<(), GateError> {
        if self.is_active(caller) {
            debug!(account = %caller, "admitted");
            Ok(())
        } else {
            warn!(account = %caller, "admission denied");
            Err(GateError::SubscriptionRequired {
                account: caller.clone(),
            })
        }
    }

    /// Forward `request` to the venue if `caller` is admitted.
    ///
    /// The venue is never invoked for an inactive caller. The request is
    /// passed through unmodified and the venue's receipt returned as is.
    /// The subscription is not consumed.
    pub fn execute_gated_swap(
        &self,
        caller: &AccountId,
        request: &SwapRequest,
    ) -> Result<SwapReceipt, GateError> {
        self.admit(caller)?;
        let venue = self.venue.as_ref().ok_or(GateError::VenueNotConfigured)?;

        let _in_flight = self.in_flight.enter(caller).ok_or_else(|| {
            warn!(account = %caller, "nested gated swap refused");
            GateError::Reentrant {
                account: caller.clone(),
            }
        })?;

        let receipt = venue.swap(caller, request).map_err(|err| {
            warn!(account = %caller, error = %err, "venue rejected gated swap");
            GateError::Venue(err)
        })?;

        self.state.lock().events.push(
            GateEvent::SwapForwarded {
                account: caller.clone(),
                amount_in: receipt.amount_in,
                amount_out: receipt.amount_out,
            },
            self.clock.now(),
        );
        debug!(account = %caller, amount_out = receipt.amount_out, "gated swap completed");
        Ok(receipt)
    }

    /// Sweep the whole custody balance to the admin.
    ///
    /// Only the admin may call this. The balance is read fresh under the
    /// state lock, so no concurrent subscribe can slip a fee in between the
    /// read and the transfer. Returns the amount moved.
    pub fn withdraw(&self, caller: &AccountId) -> Result<Amount, GateError> {
        if caller != &self.config.admin {
            warn!(caller = %caller, "withdraw refused: not admin");
            return Err(GateError::Unauthorized {
                caller: caller.clone(),
            });
        }

        let mut state = self.state.lock();
        let gate = &self.config.gate_account;
        let amount = self.ledger.balance_of(gate);
        if amount > 0 {
            self.ledger
                .transfer(gate, &self.config.admin, amount)
                .map_err(GateError::TransferFailed)?;
        }

        state.events.push(
            GateEvent::Withdrawn {
                admin: self.config.admin.clone(),
                amount,
            },
            self.clock.now(),
        );
        info!(admin = %self.config.admin, amount, "custody withdrawn");
        Ok(amount)
    }

    /// Subscriber map and event log, for snapshots.
    pub(crate) fn export_state(&self) -> (Vec<(AccountId, Expiry)>, EventLog) {
        let state = self.state.lock();
        let subscribers = state
            .subscribers
            .iter()
            .map(|(account, expiry)| (account.clone(), *expiry))
            .collect();
        (subscribers, state.events.clone())
    }
}

impl AdmissionHook for SubscriptionGate {
    fn before_swap(&self, trader: &AccountId) -> Result<(), GateError> {
        self.admit(trader)
    }
}

impl std::fmt::Debug for SubscriptionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGate")
            .field("config", &self.config)
            .field("has_venue", &self.venue.is_some())
            .finish_non_exhaustive()
    }
}
