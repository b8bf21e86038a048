//! Fluent construction of a [`SubscriptionGate`].
//!
//! The builder collects configuration and collaborators, validates the
//! resulting [`GateConfig`] (reporting every violation at once), and hands
//! back a gate whose configuration is frozen from then on.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use swapgate::builder::GateBuilder;
//! use swapgate::ledger::InMemoryLedger;
//! use swapgate::venue::RecordingVenue;
//! use swapgate::clock::SystemClock;
//!
//! let gate = GateBuilder::new()
//!     .payment_token("MTK")
//!     .gate_account("gate")
//!     .admin("deployer")
//!     .price(10)
//!     .duration_secs(30 * 24 * 60 * 60)
//!     .ledger(Arc::new(InMemoryLedger::new()))
//!     .venue("router", Arc::new(RecordingVenue::new(Arc::new(SystemClock))))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(gate.price(), 10);
//! ```

mod error;

pub use error::BuildError;

use crate::clock::{Clock, SystemClock};
use crate::config::{GateConfig, IntegrationMode, DEFAULT_JOURNAL_CAPACITY};
use crate::core::{AccountId, Amount};
use crate::gate::{GateState, SubscriptionGate};
use crate::ledger::Ledger;
use crate::venue::SwapVenue;
use std::sync::Arc;
use stillwater::validation::Validation;
use tracing::warn;

/// Builder for constructing a gate with a fluent API.
pub struct GateBuilder {
    payment_token: Option<AccountId>,
    gate_account: Option<AccountId>,
    admin: Option<AccountId>,
    price: Option<Amount>,
    duration_secs: Option<u64>,
    venue_id: Option<AccountId>,
    integration: IntegrationMode,
    journal_capacity: Option<usize>,
    ledger: Option<Arc<dyn Ledger>>,
    venue: Option<Arc<dyn SwapVenue>>,
    clock: Option<Arc<dyn Clock>>,
    state: GateState,
}

impl Default for GateBuilder {
    fn default() -> Self {
        Self {
            payment_token: None,
            gate_account: None,
            admin: None,
            price: None,
            duration_secs: None,
            venue_id: None,
            integration: IntegrationMode::default(),
            journal_capacity: Some(DEFAULT_JOURNAL_CAPACITY),
            ledger: None,
            venue: None,
            clock: None,
            state: GateState::default(),
        }
    }
}

impl GateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration. Collaborators still need to be
    /// supplied.
    pub fn from_config(config: GateConfig) -> Self {
        Self {
            payment_token: Some(config.payment_token),
            gate_account: Some(config.gate_account),
            admin: Some(config.admin),
            price: Some(config.price),
            duration_secs: Some(config.duration_secs),
            venue_id: config.venue,
            integration: config.integration,
            journal_capacity: config.journal_capacity,
            ..Self::default()
        }
    }

    pub fn payment_token(mut self, token: impl Into<AccountId>) -> Self {
        self.payment_token = Some(token.into());
        self
    }

    pub fn gate_account(mut self, account: impl Into<AccountId>) -> Self {
        self.gate_account = Some(account.into());
        self
    }

    /// Set the admin. This is the identity deploying the gate.
    pub fn admin(mut self, admin: impl Into<AccountId>) -> Self {
        self.admin = Some(admin.into());
        self
    }

    pub fn price(mut self, price: Amount) -> Self {
        self.price = Some(price);
        self
    }

    pub fn duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    pub fn ledger(mut self, ledger: Arc<dyn Ledger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Name and attach the venue admitted swaps are forwarded to.
    pub fn venue(mut self, id: impl Into<AccountId>, venue: Arc<dyn SwapVenue>) -> Self {
        self.venue_id = Some(id.into());
        self.venue = Some(venue);
        self
    }

    /// Attach the venue handle for a venue already named by the config.
    pub fn attach_venue(mut self, venue: Arc<dyn SwapVenue>) -> Self {
        self.venue = Some(venue);
        self
    }

    /// Configure the gate as a router plugin with no venue of its own.
    pub fn plugin_mode(mut self) -> Self {
        self.integration = IntegrationMode::Plugin;
        self
    }

    /// Keep only the newest `capacity` journal entries.
    pub fn journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = Some(capacity);
        self
    }

    /// Keep every journal entry for the life of the gate.
    pub fn unbounded_journal(mut self) -> Self {
        self.journal_capacity = None;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub(crate) fn with_state(mut self, state: GateState) -> Self {
        self.state = state;
        self
    }

    /// Build the gate.
    /// Returns an error if required pieces are missing or the configuration
    /// is invalid.
    pub fn build(self) -> Result<SubscriptionGate, BuildError> {
        let config = GateConfig {
            payment_token: self.payment_token.ok_or(BuildError::MissingPaymentToken)?,
            gate_account: self.gate_account.ok_or(BuildError::MissingGateAccount)?,
            admin: self.admin.ok_or(BuildError::MissingAdmin)?,
            price: self.price.ok_or(BuildError::MissingPrice)?,
            duration_secs: self.duration_secs.ok_or(BuildError::MissingDuration)?,
            venue: self.venue_id,
            integration: self.integration,
            journal_capacity: self.journal_capacity,
        };

        if let Validation::Failure(violations) = config.validate() {
            return Err(BuildError::InvalidConfig(violations.into_vec()));
        }

        let ledger = self.ledger.ok_or(BuildError::MissingLedger)?;
        // A plugin-mode gate never forwards swaps itself.
        let venue = match config.integration {
            IntegrationMode::Delegated => Some(self.venue.ok_or(BuildError::MissingVenue)?),
            IntegrationMode::Plugin => None,
        };

        for warning in config.warnings() {
            warn!(gate = %config.gate_account, "{warning}");
        }

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(SubscriptionGate::from_parts(
            config, ledger, venue, clock, self.state,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ConfigViolation;
    use crate::ledger::InMemoryLedger;
    use crate::venue::RecordingVenue;

    fn complete() -> GateBuilder {
        let clock = Arc::new(ManualClock::starting_now());
        GateBuilder::new()
            .payment_token("MTK")
            .gate_account("gate")
            .admin("deployer")
            .price(10)
            .duration_secs(60)
            .ledger(Arc::new(InMemoryLedger::new()))
            .venue("router", Arc::new(RecordingVenue::new(clock.clone())))
            .clock(clock)
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = GateBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingPaymentToken)));

        let result = GateBuilder::new()
            .payment_token("MTK")
            .gate_account("gate")
            .admin("deployer")
            .build();
        assert!(matches!(result, Err(BuildError::MissingPrice)));
    }

    #[test]
    fn builder_requires_ledger() {
        let result = GateBuilder::new()
            .payment_token("MTK")
            .gate_account("gate")
            .admin("deployer")
            .price(1)
            .duration_secs(1)
            .plugin_mode()
            .build();

        assert!(matches!(result, Err(BuildError::MissingLedger)));
    }

    #[test]
    fn delegated_mode_requires_venue_handle() {
        let config = complete().build().unwrap().config().clone();

        let result = GateBuilder::from_config(config)
            .ledger(Arc::new(InMemoryLedger::new()))
            .build();

        assert!(matches!(result, Err(BuildError::MissingVenue)));
    }

    #[test]
    fn invalid_config_lists_every_violation() {
        let result = complete().gate_account("deployer").duration_secs(u64::MAX).build();

        match result {
            Err(BuildError::InvalidConfig(violations)) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.contains(&ConfigViolation::DurationOutOfRange {
                    duration_secs: u64::MAX
                }));
            }
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn fluent_api_builds_gate() {
        let gate = complete().build().unwrap();

        assert_eq!(gate.admin(), &AccountId::from("deployer"));
        assert_eq!(gate.duration_secs(), 60);
        assert_eq!(gate.config().integration, IntegrationMode::Delegated);
        assert!(gate.events().is_empty());
    }

    #[test]
    fn from_config_round_trips() {
        let config = complete().build().unwrap().config().clone();
        let clock = Arc::new(ManualClock::starting_now());

        let rebuilt = GateBuilder::from_config(config.clone())
            .ledger(Arc::new(InMemoryLedger::new()))
            .attach_venue(Arc::new(RecordingVenue::new(clock)))
            .build()
            .unwrap();

        assert_eq!(rebuilt.config(), &config);
    }

    #[test]
    fn plugin_mode_drops_venue_handle() {
        use crate::clock::Clock;
        use crate::gate::GateError;
        use crate::venue::SwapRequest;
        use chrono::TimeDelta;

        let clock = Arc::new(ManualClock::starting_now());
        let venue = Arc::new(RecordingVenue::new(clock.clone()));
        let gate = complete()
            .price(0)
            .venue("router", venue.clone())
            .plugin_mode()
            .clock(clock.clone())
            .build()
            .unwrap();
        let alice = AccountId::from("alice");
        gate.subscribe(&alice).unwrap();

        let request =
            SwapRequest::exact_input("MTK", "USD", "alice", 1, clock.now() + TimeDelta::minutes(1));
        let result = gate.execute_gated_swap(&alice, &request);

        assert!(matches!(result, Err(GateError::VenueNotConfigured)));
        assert_eq!(venue.call_count(), 0);
    }

    #[test]
    fn journal_capacity_reaches_the_gate() {
        let gate = complete().journal_capacity(1).price(0).build().unwrap();
        gate.subscribe(&AccountId::from("alice")).unwrap();
        gate.subscribe(&AccountId::from("bob")).unwrap();

        let events = gate.events();
        assert_eq!(events.capacity(), Some(1));
        assert_eq!(events.entries().len(), 1);
        assert_eq!(events.evicted(), 1);
    }

    #[test]
    fn journal_defaults_to_bounded() {
        let gate = complete().build().unwrap();
        assert_eq!(gate.config().journal_capacity, Some(DEFAULT_JOURNAL_CAPACITY));
    }
}
