//! Plugin integration: the router owns the venue and asks the gate.
//!
//! In this direction traders call the router, and the router consults an
//! installed [`AdmissionHook`] before every swap. With no hook installed the
//! router forwards everything.

use super::{SwapReceipt, SwapRequest, SwapVenue};
use crate::core::AccountId;
use crate::gate::GateError;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Pre-swap admission check a router can call into.
pub trait AdmissionHook: Send + Sync {
    fn before_swap(&self, trader: &AccountId) -> Result<(), GateError>;
}

/// Router that forwards swaps to a venue behind an optional admission hook.
pub struct PluggedRouter {
    venue: Arc<dyn SwapVenue>,
    plugin: RwLock<Option<Arc<dyn AdmissionHook>>>,
}

impl PluggedRouter {
    pub fn new(venue: Arc<dyn SwapVenue>) -> Self {
        Self {
            venue,
            plugin: RwLock::new(None),
        }
    }

    /// Install or replace the admission hook.
    pub fn set_plugin(&self, plugin: Arc<dyn AdmissionHook>) {
        *self.plugin.write() = Some(plugin);
    }

    pub fn clear_plugin(&self) {
        *self.plugin.write() = None;
    }

    pub fn has_plugin(&self) -> bool {
        self.plugin.read().is_some()
    }

    pub fn swap_exact_input_single(
        &self,
        trader: &AccountId,
        request: &SwapRequest,
    ) -> Result<SwapReceipt, GateError> {
        // Clone out so the hook and venue run without the plugin lock held.
        let plugin = self.plugin.read().clone();
        if let Some(plugin) = plugin {
            plugin.before_swap(trader)?;
        }
        debug!(trader = %trader, amount_in = request.amount_in, "router forwarding swap");
        self.venue.swap(trader, request).map_err(GateError::Venue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::venue::RecordingVenue;
    use chrono::TimeDelta;

    struct DenyAll;

    impl AdmissionHook for DenyAll {
        fn before_swap(&self, trader: &AccountId) -> Result<(), GateError> {
            Err(GateError::SubscriptionRequired {
                account: trader.clone(),
            })
        }
    }

    fn setup() -> (Arc<ManualClock>, Arc<RecordingVenue>, PluggedRouter, SwapRequest) {
        let clock = Arc::new(ManualClock::starting_now());
        let venue = Arc::new(RecordingVenue::new(clock.clone()));
        let router = PluggedRouter::new(venue.clone());
        let request =
            SwapRequest::exact_input("a", "b", "bob", 10, clock.now() + TimeDelta::minutes(10));
        (clock, venue, router, request)
    }

    #[test]
    fn forwards_without_plugin() {
        let (_clock, venue, router, request) = setup();

        let receipt = router
            .swap_exact_input_single(&AccountId::from("bob"), &request)
            .unwrap();

        assert_eq!(receipt.amount_out, 10);
        assert_eq!(venue.call_count(), 1);
    }

    #[test]
    fn plugin_denial_skips_venue() {
        let (_clock, venue, router, request) = setup();
        router.set_plugin(Arc::new(DenyAll));

        let err = router
            .swap_exact_input_single(&AccountId::from("bob"), &request)
            .unwrap_err();

        assert!(matches!(err, GateError::SubscriptionRequired { .. }));
        assert_eq!(venue.call_count(), 0);
    }

    #[test]
    fn clearing_plugin_reopens_router() {
        let (_clock, _venue, router, request) = setup();
        router.set_plugin(Arc::new(DenyAll));
        router.clear_plugin();

        assert!(!router.has_plugin());
        assert!(router
            .swap_exact_input_single(&AccountId::from("bob"), &request)
            .is_ok());
    }
}
